use crate::domain::sheets::color::RgbColor;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct DemoConfig {
    pub range: String,
    pub fill_range: Option<String>,
    pub color: RgbColor,
}
