// file: src/models/repository.rs
// description: repository record as reported by the hosting api
// reference: https://docs.github.com/en/rest/repos/repos#list-repositories-for-a-user

use serde::{Deserialize, Serialize};

/// One entry of the account listing. Fields beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "html_url")]
    pub url: String,
}

impl RepositoryRecord {
    pub fn new(
        name: impl Into<String>,
        description: Option<&str>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.map(str::to_string),
            url: url.into(),
        }
    }
}
