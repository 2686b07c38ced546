use serde::{Deserialize, Serialize};

/// Image record as the builds endpoint returns it.
///
/// Records identify themselves through `image_url`, `ImageURL` or only their
/// name depending on which service produced them. Which of these is canonical
/// is undocumented, so the fallback order lives here and nowhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub image_type: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(rename = "ImageURL", default)]
    pub image_url_alt: Option<String>,
}

impl RawImage {
    fn canonical_reference(&self) -> String {
        [self.image_url.as_deref(), self.image_url_alt.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(self.name.trim())
            .to_string()
    }
}

/// Build image as the wizard sees it, with a single identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildImage {
    pub name: String,
    pub image_type: String,
    /// Value stored in the draft when this image is selected.
    pub reference: String,
}

impl From<RawImage> for BuildImage {
    fn from(raw: RawImage) -> Self {
        let reference = raw.canonical_reference();
        BuildImage {
            name: raw.name,
            image_type: raw.image_type.unwrap_or_default(),
            reference,
        }
    }
}
