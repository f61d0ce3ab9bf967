use serde::Deserialize;

/// Upload metadata for a swing video
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewVideo {
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    /// e.g. "driver", "7 iron"
    pub club_type: Option<String>,
    /// e.g. "full swing", "approach"
    pub swing_form: Option<String>,
    pub swing_note: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoPatch {
    pub thumbnail_url: Option<String>,
    pub club_type: Option<String>,
    pub swing_form: Option<String>,
    pub swing_note: Option<String>,
}
