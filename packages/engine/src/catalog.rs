//! # Block Registry
//!
//! Projects the active block records into the catalog the strategies and the
//! builder read from. The catalog is computed on first access and kept for
//! the lifetime of the registry; later changes in the source are not seen.

use std::sync::{Arc, OnceLock};

use blockwright_common::{BlockTypeDescriptor, Catalog};
use tracing::{debug, info, instrument};

use crate::collaborators::{ActiveBlockSource, BlockRecord};

pub struct BlockRegistry {
    source: Arc<dyn ActiveBlockSource>,
    available: OnceLock<Catalog>,
}

impl BlockRegistry {
    pub fn new(source: Arc<dyn ActiveBlockSource>) -> Self {
        Self {
            source,
            available: OnceLock::new(),
        }
    }

    /// All active block types keyed by code, in source order
    pub fn available_blocks(&self) -> &Catalog {
        self.available.get_or_init(|| self.load_catalog())
    }

    pub fn descriptor(&self, code: &str) -> Option<&BlockTypeDescriptor> {
        self.available_blocks().get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.available_blocks().contains_key(code)
    }

    #[instrument(skip(self))]
    fn load_catalog(&self) -> Catalog {
        let mut catalog = Catalog::new();
        for record in self.source.find_active() {
            match project_record(record) {
                Some((code, descriptor)) => {
                    debug!(code = %code, category = %descriptor.category, "Registering block type");
                    catalog.insert(code, descriptor);
                }
                None => debug!("Skipping block record without code"),
            }
        }
        info!(block_types = catalog.len(), "Block catalog loaded");
        catalog
    }
}

/// Turn a store record into a catalog entry; records without a code are dropped
fn project_record(record: BlockRecord) -> Option<(String, BlockTypeDescriptor)> {
    let code = record.code?;
    let (category, category_label) = match record.category {
        Some(category) => (category.code.unwrap_or_default(), category.label),
        None => (String::new(), None),
    };

    Some((
        code,
        BlockTypeDescriptor {
            label: record.label,
            icon: record.icon,
            category,
            category_label,
            default_data: record.default_data,
            template: record.template,
            html_code: record.html_code,
        },
    ))
}
