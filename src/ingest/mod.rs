/// Forecast ingestion.
///
/// Submodules:
/// - `forecast` — decodes hourly forecast payloads into ordered samples.

pub mod forecast;
