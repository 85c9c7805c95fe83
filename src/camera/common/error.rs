use thiserror::Error;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Corrupt scene file: {0}")]
    CorruptScene(String),

    #[error("Corrupt bitmap: {0}")]
    CorruptBitmap(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error(
        "Crop window out of range: left={left}, top={top}, width={width}, height={height} \
         on a {sensor_width}x{sensor_height} sensor"
    )]
    CropOutOfRange {
        left: usize,
        top: usize,
        width: usize,
        height: usize,
        sensor_width: usize,
        sensor_height: usize,
    },

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Pipeline failed: {0}")]
    PipelineError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SensorError>;
