use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("width must be positive (got {0})")]
    Width(f64),
    #[error("height must be positive (got {0})")]
    Height(f64),
    #[error("cell size must be positive (got {0})")]
    CellSize(f64),
    #[error("variance must be finite (got {0})")]
    Variance(f64),
    #[error("a gradient needs at least 2 stops (got {0})")]
    GradientStops(usize),
    #[error("grid reaches {0}, outside the integer coordinate range")]
    Extent(f64),
    #[error("grid would have {0} points, too many to generate")]
    TooManyPoints(f64),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DegenerateInputError {
    #[error("at least 3 points are needed to triangulate (got {0})")]
    TooFewPoints(usize),
    #[error("all points are collinear")]
    Collinear,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerateError {
    #[error("invalid configuration, {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("cannot triangulate point field, {0}")]
    DegenerateInput(#[from] DegenerateInputError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("'{0}' is not a hex color (expected #rgb or #rrggbb)")]
    InvalidHex(String),
}

#[derive(Error, Debug)]
pub enum PolyError {
    #[error("{0}")]
    Generate(#[from] GenerateError),
    #[error("could not parse config file\n{0}")]
    JsonError(#[from] serde_json::Error),
    #[error("could not parse config file\n{0}")]
    RonError(#[from] ron::error::SpannedError),
    #[error("could not parse config file\n{0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("failed to read or write file\n{0}")]
    FileReadError(#[from] std::io::Error),
    #[error("file does not have a valid extension")]
    ExtensionError,
    #[error("failed to save image\n{0}")]
    ImageSaveError(#[from] image::ImageError),
    #[error("invalid color, {0}")]
    Color(#[from] ColorError),
}
