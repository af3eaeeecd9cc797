//! Result Set Module
//! Response schema of the analysis service and the in-memory result set built from it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResultSetError {
    #[error("{field} has {actual} entries, expected {expected} (one per input line)")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Response body of `POST /api/process-texts/`.
///
/// Fixed-size arrays reject projections with the wrong number of coordinates at decode time.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectionResponse {
    pub embeddings: Vec<Vec<f64>>,
    #[serde(rename = "1d")]
    pub one_d: Vec<[f64; 1]>,
    #[serde(rename = "2d")]
    pub two_d: Vec<[f64; 2]>,
    #[serde(rename = "3d")]
    pub three_d: Vec<[f64; 3]>,
}

/// Request body of `POST /api/process-texts/`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessTextsRequest<'a> {
    pub texts: &'a [String],
}

/// Texts, embeddings and projections of one successful analysis, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    texts: Vec<String>,
    embeddings: Vec<Vec<f64>>,
    one_d: Vec<[f64; 1]>,
    two_d: Vec<[f64; 2]>,
    three_d: Vec<[f64; 3]>,
}

impl ResultSet {
    /// Pair a service response with the texts that produced it.
    ///
    /// Every sequence must have one entry per text; labels are assigned by position.
    pub fn new(texts: Vec<String>, response: ProjectionResponse) -> Result<Self, ResultSetError> {
        let expected = texts.len();
        let lengths = [
            ("embeddings", response.embeddings.len()),
            ("1d", response.one_d.len()),
            ("2d", response.two_d.len()),
            ("3d", response.three_d.len()),
        ];
        for (field, actual) in lengths {
            if actual != expected {
                return Err(ResultSetError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }

        Ok(Self {
            texts,
            embeddings: response.embeddings,
            one_d: response.one_d,
            two_d: response.two_d,
            three_d: response.three_d,
        })
    }

    pub fn texts(&self) -> &[String] {
        &self.texts
    }

    pub fn line_count(&self) -> usize {
        self.texts.len()
    }

    pub fn one_d(&self) -> &[[f64; 1]] {
        &self.one_d
    }

    pub fn two_d(&self) -> &[[f64; 2]] {
        &self.two_d
    }

    pub fn three_d(&self) -> &[[f64; 3]] {
        &self.three_d
    }

    /// Build the raw-data export document, each projection point annotated with its text.
    pub fn to_export(&self) -> ExportDocument<'_> {
        ExportDocument {
            texts: &self.texts,
            embeddings: &self.embeddings,
            one_d: self
                .one_d
                .iter()
                .zip(&self.texts)
                .map(|(p, text)| (p[0], 0.0, text.as_str()))
                .collect(),
            two_d: self
                .two_d
                .iter()
                .zip(&self.texts)
                .map(|(p, text)| (p[0], p[1], text.as_str()))
                .collect(),
            three_d: self
                .three_d
                .iter()
                .zip(&self.texts)
                .map(|(p, text)| (p[0], p[1], p[2], text.as_str()))
                .collect(),
        }
    }
}

/// Layout of `positioning_data.json`.
///
/// Projection points serialize as arrays: `[x, 0, text]`, `[x, y, text]`, `[x, y, z, text]`.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    pub texts: &'a [String],
    pub embeddings: &'a [Vec<f64>],
    #[serde(rename = "1d")]
    pub one_d: Vec<(f64, f64, &'a str)>,
    #[serde(rename = "2d")]
    pub two_d: Vec<(f64, f64, &'a str)>,
    #[serde(rename = "3d")]
    pub three_d: Vec<(f64, f64, f64, &'a str)>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Service response for the input `"cat\ndog"`.
    pub fn cat_dog_response() -> ProjectionResponse {
        serde_json::from_str(
            r#"{
                "1d": [[0.1], [0.4]],
                "2d": [[0.1, 0.2], [0.4, 0.5]],
                "3d": [[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]],
                "embeddings": [[0.01, 0.02, 0.03], [0.04, 0.05, 0.06]]
            }"#,
        )
        .unwrap()
    }

    pub fn cat_dog_texts() -> Vec<String> {
        vec!["cat".to_string(), "dog".to_string()]
    }

    pub fn cat_dog() -> ResultSet {
        ResultSet::new(cat_dog_texts(), cat_dog_response()).unwrap()
    }
}
