use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSkillRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}
