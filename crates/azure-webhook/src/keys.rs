//! Sentinel annotation and label keys
//!
//! The exact spelling of these keys is shared with the rest of the platform,
//! so they live in one table that is handed to the mutators that need them.

use azure_common::{
    ANNOTATION_KEY_USE_FLOW, ANNOTATION_KEY_USE_TF, SEED_LABEL_KEY_USE_FLOW,
    SEED_LABEL_USE_FLOW_VALUE_NEW,
};

/// Keys and values steering the infrastructure reconciliation engine choice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentinelKeys {
    /// Shoot annotation forcing the legacy terraformer path
    pub legacy_annotation: String,
    /// Seed label selecting the flow engine
    pub flow_seed_label: String,
    /// Seed label value enabling flow for new infrastructures
    pub flow_seed_label_value: String,
    /// Infrastructure annotation requesting the flow engine
    pub flow_annotation: String,
    /// Value written to `flow_annotation`
    pub flow_annotation_value: String,
}

impl Default for SentinelKeys {
    fn default() -> Self {
        Self {
            legacy_annotation: ANNOTATION_KEY_USE_TF.to_string(),
            flow_seed_label: SEED_LABEL_KEY_USE_FLOW.to_string(),
            flow_seed_label_value: SEED_LABEL_USE_FLOW_VALUE_NEW.to_string(),
            flow_annotation: ANNOTATION_KEY_USE_FLOW.to_string(),
            flow_annotation_value: "true".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_match_platform_spelling() {
        let keys = SentinelKeys::default();
        assert_eq!(
            keys.legacy_annotation,
            "azure.provider.extensions.gardener.cloud/use-tf"
        );
        assert_eq!(
            keys.flow_seed_label,
            "azure.provider.extensions.gardener.cloud/use-flow"
        );
        assert_eq!(keys.flow_annotation, keys.flow_seed_label);
        assert_eq!(keys.flow_seed_label_value, "new");
        assert_eq!(keys.flow_annotation_value, "true");
    }
}
