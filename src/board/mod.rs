//! Customer suggestion board workflows: dataset import and the admin core.

pub mod importer;
pub mod suggestions;
