//! Interactive terminal operator backed by `dialoguer`.

use std::io::{self, Write};

use dialoguer::Input;
use tabled::Tabled;

use siteforge_core::{CoreError, InventoryDevice, Operator};

use crate::output;

// ── Inventory table ─────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct InventoryRow {
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "Type")]
    device_type: String,
    #[tabled(rename = "SKU")]
    sku: String,
}

impl From<&InventoryDevice> for InventoryRow {
    fn from(d: &InventoryDevice) -> Self {
        Self {
            mac: d.mac.clone(),
            serial: d.serial.clone().unwrap_or_default(),
            device_type: d.device_type.clone().unwrap_or_default(),
            sku: d.sku.clone().unwrap_or_default(),
        }
    }
}

// ── Operator ────────────────────────────────────────────────────────

/// Prompts on the controlling terminal. The inventory table goes to stderr
/// so stdout stays clean for `--output json`.
pub struct TerminalOperator;

impl Operator for TerminalOperator {
    fn ask(&mut self, prompt: &str) -> Result<String, CoreError> {
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| CoreError::Operator {
                message: e.to_string(),
            })
    }

    fn present_inventory(&mut self, devices: &[InventoryDevice]) {
        let rows: Vec<InventoryRow> = devices.iter().map(InventoryRow::from).collect();
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", output::render_table(&rows));
    }
}
