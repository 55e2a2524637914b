use serde::{Deserialize, Serialize};

// MODELS

/// A flag definition installed before the integration tests run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSeed {
    pub name: &'static str,
    pub expression: &'static str,
}

/// Body of `POST /flags/{name}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateFlagRequest {
    pub expression: String,
}

// SEED DATA

pub const SEED_DATA: [FlagSeed; 5] = [
    FlagSeed {
        name: "dev.openfeature.bool_flag",
        expression: "true",
    },
    FlagSeed {
        name: "dev.openfeature.string_flag",
        expression: r#""string-value""#,
    },
    FlagSeed {
        name: "dev.openfeature.int_flag",
        expression: "42",
    },
    FlagSeed {
        name: "dev.openfeature.float_flag",
        expression: "3.14",
    },
    FlagSeed {
        name: "dev.openfeature.object_flag",
        // TODO: seed {"name":"OpenFeature","version":"1.0.0"} once object flags evaluate end to end
        expression: r#""{}""#,
    },
];

/// Flag fetched on its own after seeding, as a spot check.
pub const INSPECTED_FLAG: &str = "dev.openfeature.object_flag";
