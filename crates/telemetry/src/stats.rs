//! Aggregate report over the interaction log.

use crate::record::InteractionRecord;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct InteractionStats {
    pub count: usize,
    pub mean_latency_ms: f64,
    pub p95_latency_ms: f64,
    /// Percentage of interactions flagged as errors, 0–100.
    pub error_rate_pct: f64,
    /// `None` when no record carries a memory sample.
    pub mean_memory_mb: Option<f64>,
    /// Count per mode, most frequent first.
    pub by_mode: Vec<(String, usize)>,
    /// Count per tool, most frequent first.
    pub by_tool: Vec<(String, usize)>,
}

impl InteractionStats {
    pub fn from_records(records: &[InteractionRecord]) -> Self {
        let count = records.len();
        let latencies: Vec<f64> = records.iter().map(|r| r.latency_ms).collect();
        let errors = records.iter().filter(|r| r.error).count();
        let memory: Vec<f64> = records.iter().filter_map(|r| r.memory_mb).collect();

        Self {
            count,
            mean_latency_ms: mean(&latencies).unwrap_or(0.0),
            p95_latency_ms: quantile(&latencies, 0.95).unwrap_or(0.0),
            error_rate_pct: if count == 0 {
                0.0
            } else {
                errors as f64 / count as f64 * 100.0
            },
            mean_memory_mb: mean(&memory),
            by_mode: tally(records.iter().map(|r| r.mode.as_str())),
            by_tool: tally(records.iter().map(|r| r.tool.as_str())),
        }
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile with linear interpolation between closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64))
}

/// Count occurrences; most frequent first, ties by name.
fn tally<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in items {
        *counts.entry(item).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    out
}

impl fmt::Display for InteractionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Interacciones:            {}", self.count)?;
        writeln!(f, "Latencia promedio (ms):   {:.1}", self.mean_latency_ms)?;
        writeln!(f, "Latencia p95 (ms):        {:.1}", self.p95_latency_ms)?;
        writeln!(f, "% con error:              {:.1}%", self.error_rate_pct)?;
        match self.mean_memory_mb {
            Some(mb) => writeln!(f, "Memoria promedio (MB):    {mb:.1}")?,
            None => writeln!(f, "Memoria promedio (MB):    N/D")?,
        }

        writeln!(f, "\nPor modo:")?;
        for (mode, n) in &self.by_mode {
            writeln!(f, "  {mode:<20} {n}")?;
        }
        writeln!(f, "\nPor herramienta:")?;
        for (tool, n) in &self.by_tool {
            writeln!(f, "  {tool:<20} {n}")?;
        }
        Ok(())
    }
}

/// Rows shown by the interaction detail listing.
pub const DETAIL_ROWS: usize = 50;

const MESSAGE_WIDTH: usize = 40;

/// The most recent interactions, newest first, rendered as a table.
#[derive(Debug)]
pub struct RecentInteractions<'a> {
    rows: Vec<&'a InteractionRecord>,
}

impl<'a> RecentInteractions<'a> {
    pub fn new(records: &'a [InteractionRecord], limit: usize) -> Self {
        let mut rows: Vec<&InteractionRecord> = records.iter().collect();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        rows.truncate(limit);
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for RecentInteractions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<19}  {:<40}  {:<6}  {:<18}  {:>10}  {:<5}  {:>8}",
            "Fecha (UTC)", "Mensaje", "Modo", "Herramienta", "Latencia", "Error", "MB"
        )?;
        for r in &self.rows {
            let memory = r.memory_mb.map_or_else(|| "N/D".to_string(), |mb| format!("{mb:.1}"));
            writeln!(
                f,
                "{:<19}  {:<40}  {:<6}  {:<18}  {:>10.1}  {:<5}  {:>8}",
                r.timestamp.format("%Y-%m-%d %H:%M:%S"),
                clip(&r.user_message, MESSAGE_WIDTH),
                r.mode.as_str(),
                r.tool,
                r.latency_ms,
                if r.error { "sí" } else { "no" },
                memory,
            )?;
        }
        Ok(())
    }
}

/// First `width` characters on one line, with `…` when cut.
fn clip(text: &str, width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let mut out: String = flat.chars().take(width - 1).collect();
    out.push('…');
    out
}
