//! The closed set of recognized O*NET source files and the summary category
//! each one feeds.

use std::fmt;

use serde::Serialize;

/// Canonical name of the occupation code column.
pub const SOC_CODE_COLUMN: &str = "SOC_Code";
/// Canonical name of the occupation title column.
pub const OCCUPATION_COLUMN: &str = "Occupation";
/// File name of the categorized output written next to the inputs.
pub const OUTPUT_FILE_NAME: &str = "SOC_Categories_Phase1.xlsx";

/// Accepted spellings of the occupation code column, in priority order.
pub const SOC_CODE_CANDIDATES: [&str; 3] = ["O*NET-SOC Code", "Code", SOC_CODE_COLUMN];
/// Accepted spellings of the occupation title column, in priority order.
pub const OCCUPATION_CANDIDATES: [&str; 2] = ["Title", OCCUPATION_COLUMN];
/// Accepted spellings of the value column, in priority order.
pub const VALUE_CANDIDATES: [&str; 3] = ["Data Value", "Context", "Job Zone"];

/// Summary dimension a source file is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Communication,
    Responsibility,
    Physical,
    Criticality,
    Routine,
    Skills,
    /// Auxiliary AI occupational exposure data. Merged, never aggregated.
    #[serde(rename = "AIOE")]
    Aioe,
}

impl Category {
    /// The six categories that make up the aggregated output, in column order.
    pub const PRIMARY: [Category; 6] = [
        Category::Communication,
        Category::Responsibility,
        Category::Physical,
        Category::Criticality,
        Category::Routine,
        Category::Skills,
    ];

    /// Column label used for this category in tables and workbooks.
    pub fn label(self) -> &'static str {
        match self {
            Category::Communication => "Communication",
            Category::Responsibility => "Responsibility",
            Category::Physical => "Physical",
            Category::Criticality => "Criticality",
            Category::Routine => "Routine",
            Category::Skills => "Skills",
            Category::Aioe => "AIOE",
        }
    }

    pub fn is_primary(self) -> bool {
        !matches!(self, Category::Aioe)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Work-context file name → category. Only these names are ever loaded.
pub const CATEGORY_MAP: [(&str, Category); 18] = [
    (
        "Face-to-Face_Discussions_with_Individuals_and_Within_Teams.xlsx",
        Category::Communication,
    ),
    ("Public_Speaking.xlsx", Category::Communication),
    (
        "Work_Outcomes_and_Results_of_Other_Workers.xlsx",
        Category::Responsibility,
    ),
    (
        "Health_and_Safety_of_Other_Workers.xlsx",
        Category::Responsibility,
    ),
    (
        "Determine_Tasks_Priorities_and_Goals.xlsx",
        Category::Responsibility,
    ),
    (
        "Outdoors_Exposed_to_All_Weather_Conditions.xlsx",
        Category::Physical,
    ),
    ("Physical_Proximity.xlsx", Category::Physical),
    ("Consequence of Error.xlsx", Category::Criticality),
    ("Freedom of Decisions.xlsx", Category::Criticality),
    ("Frequency of Decision Making.xlsx", Category::Criticality),
    ("Degree_of_Automation.xlsx", Category::Routine),
    ("Structured_vs_Unstructured_Work.xlsx", Category::Routine),
    (
        "Job_Zone_One_Little_or_No_Preparation_Needed.xlsx",
        Category::Skills,
    ),
    (
        "Job_Zone_Two_Some_Preparation_Needed.xlsx",
        Category::Skills,
    ),
    (
        "Job_Zone_Three_Medium_Preparation_Needed.xlsx",
        Category::Skills,
    ),
    (
        "Job_Zone_Four_Considerable_Preparation_Needed.xlsx",
        Category::Skills,
    ),
    (
        "Job_Zone_Five_Extensive_Preparation_Needed.xlsx",
        Category::Skills,
    ),
    ("AIOE_DataAppendix.xlsx", Category::Aioe),
];

/// Looks up the category for an exact file name. Matching is case sensitive.
pub fn category_for(file_name: &str) -> Option<Category> {
    CATEGORY_MAP
        .iter()
        .find(|(name, _)| *name == file_name)
        .map(|(_, category)| *category)
}

/// Returns the position of the first candidate present in `headers`.
pub fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == candidate))
}
