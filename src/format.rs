//! Output rendering for device rows

use clap::ValueEnum;
use serde::Serialize;

use crate::audio::device::Device;

/// Rendering mode; never affects state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Name only, one device per line
    Human,
    /// `name,type,id,uid`, one device per line
    Cli,
    /// One JSON object per line
    Json,
}

/// JSON row shape: every value is a string, the id included.
#[derive(Serialize)]
struct DeviceRow<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    id: String,
    uid: &'a str,
}

/// Render one device in the requested format, without a trailing newline.
pub fn render(device: &Device, format: OutputFormat) -> String {
    match format {
        OutputFormat::Human => device.name.clone(),
        OutputFormat::Cli => format!(
            "{},{},{},{}",
            device.name,
            device.kind.as_str(),
            device.id,
            device.uid
        ),
        OutputFormat::Json => {
            let row = DeviceRow {
                name: &device.name,
                kind: device.kind.as_str(),
                id: device.id.to_string(),
                uid: &device.uid,
            };
            serde_json::to_string(&row).expect("device row serializes")
        }
    }
}
