use crate::error::AdvisorError;
use serde::Serialize;
use std::fs;

pub const CATALOG_HEADER: [&str; 6] = [
    "Career",
    "Description",
    "Skills",
    "Course_Link",
    "Book",
    "Certification",
];

/// One career row from the catalog file. Row order is significant: the model
/// artifact returns positional indices into this table.
#[derive(Debug, Clone, Serialize)]
pub struct CareerRecord {
    pub career: String,
    pub description: String,
    pub skills: String,
    pub course_link: String,
    pub book: String,
    pub certification: String,
}

#[derive(Debug)]
pub struct CareerCatalog {
    records: Vec<CareerRecord>,
}

impl CareerCatalog {
    pub fn load(path: &str) -> Result<Self, AdvisorError> {
        let raw = fs::read_to_string(path).map_err(|e| AdvisorError::MissingArtifact {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        let catalog = Self::parse(&raw).map_err(|reason| AdvisorError::CorruptArtifact {
            path: path.to_string(),
            reason,
        })?;
        log::info!("career catalog: {} rows", catalog.len());
        Ok(catalog)
    }

    pub fn parse(raw: &str) -> Result<Self, String> {
        // Flexible mode so the field count is checked here, with the row
        // number in the message, instead of inside the csv crate.
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(raw.as_bytes());

        let header = reader
            .headers()
            .map_err(|e| format!("unreadable header: {}", e))?;
        if header.iter().ne(CATALOG_HEADER.iter().copied()) {
            return Err(format!(
                "unexpected header {:?}, expected {:?}",
                header, CATALOG_HEADER
            ));
        }

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.map_err(|e| format!("row {}: {}", i + 1, e))?;
            if row.len() != CATALOG_HEADER.len() {
                return Err(format!(
                    "row {} has {} fields, expected {}",
                    i + 1,
                    row.len(),
                    CATALOG_HEADER.len()
                ));
            }
            records.push(CareerRecord {
                career: row[0].to_string(),
                description: row[1].to_string(),
                skills: row[2].to_string(),
                course_link: row[3].to_string(),
                book: row[4].to_string(),
                certification: row[5].to_string(),
            });
        }

        if records.is_empty() {
            return Err("catalog has a header but no rows".to_string());
        }
        Ok(Self { records })
    }

    pub fn get(&self, index: usize) -> Option<&CareerRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.career.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Career,Description,Skills,Course_Link,Book,Certification
Data Scientist,Builds predictive models,\"Python, SQL, Machine Learning\",https://example.com/ds,Hands-On ML,TensorFlow Developer
Web Developer,Builds web applications,\"HTML, CSS, JavaScript\",https://example.com/web,Eloquent JavaScript,AWS Developer
UX Designer,\"Designs user-centered, accessible products\",\"Figma, UX Research\",https://example.com/ux,Don't Make Me Think,NN/g UX
";

    #[test]
    fn parses_catalog_rows_in_order() {
        let catalog = CareerCatalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(0).unwrap().career, "Data Scientist");
        assert_eq!(catalog.get(2).unwrap().career, "UX Designer");
        assert!(catalog.get(3).is_none());
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let catalog = CareerCatalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.get(0).unwrap().skills, "Python, SQL, Machine Learning");
        assert_eq!(
            catalog.get(2).unwrap().description,
            "Designs user-centered, accessible products"
        );
    }

    #[test]
    fn doubled_quotes_unescape() {
        let raw = "Career,Description,Skills,Course_Link,Book,Certification\n\
                   QA Engineer,\"Says \"\"ship it\"\" carefully\",Testing,https://example.com,Book,ISTQB\n";
        let catalog = CareerCatalog::parse(raw).unwrap();
        assert_eq!(catalog.get(0).unwrap().description, "Says \"ship it\" carefully");
    }

    #[test]
    fn quoted_field_keeps_embedded_newline() {
        let raw = "Career,Description,Skills,Course_Link,Book,Certification\n\
                   SRE,\"Keeps services up.\nCarries a pager.\",Linux,https://example.com,SRE Book,CKA\n";
        let catalog = CareerCatalog::parse(raw).unwrap();
        assert_eq!(
            catalog.get(0).unwrap().description,
            "Keeps services up.\nCarries a pager."
        );
    }

    #[test]
    fn crlf_rows_parse() {
        let raw = "Career,Description,Skills,Course_Link,Book,Certification\r\n\
                   DevOps Engineer,Runs infrastructure,Linux,https://example.com,SRE Book,CKA\r\n";
        let catalog = CareerCatalog::parse(raw).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().certification, "CKA");
    }

    #[test]
    fn wrong_header_is_rejected() {
        let raw = "Name,Description,Skills,Course_Link,Book,Certification\nA,B,C,D,E,F\n";
        let err = CareerCatalog::parse(raw).unwrap_err();
        assert!(err.contains("header"));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let raw = "Career,Description,Skills,Course_Link,Book,Certification\nA,B,C,D,E\n";
        let err = CareerCatalog::parse(raw).unwrap_err();
        assert!(err.contains("fields"));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(CareerCatalog::parse("").is_err());
        assert!(
            CareerCatalog::parse("Career,Description,Skills,Course_Link,Book,Certification\n")
                .is_err()
        );
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let raw = "Career,Description,Skills,Course_Link,Book,Certification\nA,\"B,C,D,E,F\n";
        assert!(CareerCatalog::parse(raw).is_err());
    }

    #[test]
    fn missing_file_is_missing_artifact() {
        let err = CareerCatalog::load("/nonexistent/catalog.csv").unwrap_err();
        assert!(matches!(err, AdvisorError::MissingArtifact { .. }));
    }
}
