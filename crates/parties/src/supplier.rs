use serde::{Deserialize, Serialize};

use smartbiz_core::{DomainError, Entity, Operation, RecordId, Resource};

/// A supplier as stored by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub supply_item_details: String,
}

impl Entity for Supplier {
    type Id = RecordId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Editable supplier fields (create/update request body).
///
/// Never carries an id: ids are assigned by the server and travel in the path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierDraft {
    pub name: String,
    pub email: String,
    pub supply_item_details: String,
}

impl SupplierDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        supply_item_details: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            supply_item_details: supply_item_details.into(),
        }
    }

    /// All three fields are required. Format checks (e.g. email shape) are the
    /// server's business.
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("supplyItemDetails", &self.supply_item_details),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::validation(format!(
                "required field(s) missing: {}",
                missing.join(", ")
            )))
        }
    }
}

impl From<&Supplier> for SupplierDraft {
    fn from(s: &Supplier) -> Self {
        Self {
            name: s.name.clone(),
            email: s.email.clone(),
            supply_item_details: s.supply_item_details.clone(),
        }
    }
}

/// Descriptor of the `/api/suppliers` collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct Suppliers;

impl Resource for Suppliers {
    type Record = Supplier;
    type Draft = SupplierDraft;

    const PATH: &'static str = "/api/suppliers";

    fn fallback_message(op: Operation) -> &'static str {
        match op {
            Operation::List => "Failed to fetch suppliers",
            Operation::Create => "Failed to create supplier",
            Operation::Update => "Failed to update supplier",
            Operation::Delete => "Failed to delete supplier",
        }
    }

    fn validate(draft: &SupplierDraft) -> Result<(), DomainError> {
        draft.validate()
    }

    fn draft_from(record: &Supplier) -> SupplierDraft {
        SupplierDraft::from(record)
    }
}
