use chrono::Utc;

use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::format::{self, ImportReport};

/// High-level storage operations: export/import a ledger as a JSON
/// envelope, in memory or on disk.
pub struct StorageManager;

impl StorageManager {
    /// Serialize the ledger's accounts, balances and transactions.
    ///
    /// Settings are not part of the envelope.
    pub fn export_to_json(ledger: &Ledger) -> Result<String, CoreError> {
        format::write_export(
            &ledger.accounts,
            &ledger.balances,
            &ledger.transactions,
            Utc::now(),
        )
    }

    /// Parse an export envelope into a fresh ledger that keeps `settings`
    /// from `current`. Nothing is modified on error.
    pub fn import_from_json(
        current: &Ledger,
        json: &str,
    ) -> Result<(Ledger, ImportReport), CoreError> {
        let imported = format::read_export(json)?;
        let report = ImportReport::from(&imported);

        let next_sequence = imported
            .transactions
            .iter()
            .map(|t| t.sequence + 1)
            .max()
            .unwrap_or(0);

        let ledger = Ledger {
            accounts: imported.accounts,
            balances: imported.balances,
            transactions: imported.transactions,
            settings: current.settings.clone(),
            next_sequence,
        };

        Ok((ledger, report))
    }

    /// Write the full ledger, settings included, to a file (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(ledger: &Ledger, path: &str) -> Result<(), CoreError> {
        let json = serde_json::to_string_pretty(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a ledger written by [`Self::save_to_file`] (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: &str) -> Result<Ledger, CoreError> {
        let json = std::fs::read_to_string(path)?;
        let ledger: Ledger = serde_json::from_str(&json)?;
        Ok(ledger)
    }
}
