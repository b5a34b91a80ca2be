use clap::ValueEnum;
use stripname_core::{OutputFormat as CoreOutputFormat, Preview};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Tree,
    Table,
    Summary,
    Json,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Tree => Self::Tree,
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::Json => Self::Json,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for CoreOutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}
