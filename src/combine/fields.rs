use serde::{Deserialize, Serialize};

/// Sentinel requesting every available field.
pub const ALL_FIELDS: &str = "all";

/// A cost component column that tabular formats can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Price,
    MonthlyQuantity,
    Unit,
    HourlyCost,
    MonthlyCost,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 5] = [
        Field::Price,
        Field::MonthlyQuantity,
        Field::Unit,
        Field::HourlyCost,
        Field::MonthlyCost,
    ];

    pub const DEFAULT: [Field; 3] = [Field::MonthlyQuantity, Field::Unit, Field::MonthlyCost];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::MonthlyQuantity => "monthlyQuantity",
            Self::Unit => "unit",
            Self::HourlyCost => "hourlyCost",
            Self::MonthlyCost => "monthlyCost",
        }
    }

    /// Column heading used by the table and HTML renderers.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Price => "Price",
            Self::MonthlyQuantity => "Monthly Qty",
            Self::Unit => "Unit",
            Self::HourlyCost => "Hourly Cost",
            Self::MonthlyCost => "Monthly Cost",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields to render plus any warnings raised while resolving them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub fields: Vec<Field>,
    pub warnings: Vec<String>,
}

/// Resolve the user's `--fields` value against the known field names.
///
/// `None` means the flag was never given. Invalid names are dropped with one
/// warning each and never fail the run.
pub fn resolve_fields(requested: Option<&[String]>) -> FieldSelection {
    let Some(requested) = requested else {
        return FieldSelection {
            fields: Field::DEFAULT.to_vec(),
            warnings: Vec::new(),
        };
    };

    if requested.is_empty() {
        return FieldSelection {
            fields: Field::DEFAULT.to_vec(),
            warnings: vec![format!(
                "fields is empty, using defaults: [{}]",
                join_fields(&Field::DEFAULT, ",")
            )],
        };
    }

    if requested.len() == 1 && requested[0] == ALL_FIELDS {
        return FieldSelection {
            fields: Field::ALL.to_vec(),
            warnings: Vec::new(),
        };
    }

    let mut fields = Vec::with_capacity(requested.len());
    let mut warnings = Vec::new();
    for name in requested {
        match Field::parse(name) {
            Some(field) => fields.push(field),
            None => warnings.push(format!(
                "Invalid field '{}' specified, valid fields are: [{}] or '{}' to include all fields",
                name,
                join_fields(&Field::ALL, " "),
                ALL_FIELDS,
            )),
        }
    }

    FieldSelection { fields, warnings }
}

fn join_fields(fields: &[Field], sep: &str) -> String {
    fields.iter().map(Field::as_str).collect::<Vec<_>>().join(sep)
}
