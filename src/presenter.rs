use crate::catalog::{CareerCatalog, CareerRecord};
use crate::encoder::SkillRating;
use crate::error::AdvisorError;
use serde::Serialize;

/// The full result of one query: career matches nearest-first, plus (rating
/// mode only) the user's own top skills with generated reference links.
#[derive(Debug, Serialize)]
pub struct Report {
    pub recommendations: Vec<CareerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_skills: Option<Vec<RankedSkill>>,
}

#[derive(Debug, Serialize)]
pub struct RankedSkill {
    pub skill: String,
    pub rating: u8,
    pub reference: String,
}

/// Join model row indices against the catalog, preserving order and
/// duplicates exactly as the model returned them. An index past the end of
/// the catalog means the model and catalog are out of sync; that is surfaced,
/// never clamped.
pub fn join_catalog(
    indices: &[usize],
    catalog: &CareerCatalog,
) -> Result<Vec<CareerRecord>, AdvisorError> {
    indices
        .iter()
        .map(|&index| {
            catalog
                .get(index)
                .cloned()
                .ok_or(AdvisorError::IndexOutOfRange {
                    index,
                    rows: catalog.len(),
                })
        })
        .collect()
}

/// Take the top `limit` ranked skills and attach a deterministic "learn more"
/// search link to each. Pure string templating; neither the catalog nor the
/// model is consulted.
pub fn top_skills(ranked: &[SkillRating], limit: usize, resource_site: &str) -> Vec<RankedSkill> {
    ranked
        .iter()
        .take(limit)
        .map(|r| RankedSkill {
            skill: r.skill.clone(),
            rating: r.rating,
            reference: resource_link(&r.skill, resource_site),
        })
        .collect()
}

fn resource_link(skill: &str, resource_site: &str) -> String {
    format!(
        "{}?q={}+skill+description",
        resource_site,
        percent_encode(skill)
    )
}

/// Percent-encode everything outside the URL-unreserved set.
fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
