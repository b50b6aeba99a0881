//! Rule sets an upload is checked against, loadable from YAML.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{DimensionBounds, ImageType};
use crate::utils::validation::constants::{
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_IMAGE_DIMENSIONS,
};

/// Every field is optional; an absent field skips the matching check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    /// Zero means unlimited, same as absent.
    pub max_bytes: Option<u64>,
    pub allowed_extensions: Option<Vec<String>>,
    pub allowed_mime_types: Option<Vec<String>>,
    pub allowed_image_types: Option<Vec<ImageType>>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
    pub convert_png_to_jpg: bool,
}

impl ValidationRules {
    /// Rules used when no rule file is configured: small web images only.
    pub fn default_images() -> Self {
        let (max_width, max_height) = DEFAULT_MAX_IMAGE_DIMENSIONS;
        Self {
            max_bytes: Some(DEFAULT_MAX_FILE_SIZE),
            allowed_extensions: Some(DEFAULT_IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()),
            allowed_mime_types: None,
            allowed_image_types: Some(vec![ImageType::Png, ImageType::Jpeg, ImageType::Gif]),
            max_width: Some(max_width),
            max_height: Some(max_height),
            min_width: None,
            min_height: None,
            convert_png_to_jpg: true,
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self> {
        serde_yaml::from_str(source).context("Failed to parse validation rules")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        Self::from_yaml(&source)
    }

    pub fn bounds(&self) -> DimensionBounds {
        DimensionBounds {
            max_width: self.max_width,
            max_height: self.max_height,
            min_width: self.min_width,
            min_height: self.min_height,
        }
    }

    /// Whether the upload has to be checked as an image.
    pub fn is_image_rule_set(&self) -> bool {
        self.allowed_image_types.is_some() || self.bounds().any_positive()
    }
}
