use crate::error::{ReportError, Result};

pub const HEADER: (&str, &str) = ("Variable Name", "Label");

/// Survey variable codes described in the dictionary image, in their source order.
pub const VARIABLE_NAMES: [&str; 25] = [
    "GENHLTH", "MARITAL", "_SEX", "MENTHLTH", "_EDUCAG", "_INCOMG1", "POORHLTH", "ADDEPEV3",
    "_AGEG5YR", "_AGE65YR", "_AGE80", "_AGE_G", "DECIDE", "DIFFALON", "ACEDEPRS", "ACEDRINK",
    "ACEDRUGS", "ACEPRISN", "ACEDIVRC", "ACEPUNCH", "ACEHURT1", "ACESWEAR", "ACETOUCH",
    "ACETTHEM", "ACEHVSEX",
];

pub const LABELS: [&str; 25] = [
    "General Health",
    "Marital Status",
    "Calculated sex variable",
    "Number of Days Mental Health Not Good",
    "Computed level of education completed categories",
    "Computed income categories",
    "Poor Physical or Mental Health",
    "(Ever told) you had a depressive disorder",
    "Reported age in five-year age categories calculated variable",
    "Reported age in two age groups calculated variable",
    "Imputed Age value collapsed above 80",
    "Imputed age in six groups",
    "Difficulty Concentrating or Remembering",
    "Difficulty Doing Errands Alone",
    "Live With Anyone Depressed, Mentally Ill, Or Suicidal?",
    "Live With a Problem Drinker/Alcoholic?",
    "Live With Anyone Who Used Illegal Drugs or Abused Prescriptions?",
    "Live With Anyone Who Served Time in Prison or Jail?",
    "Were Your Parents Divorced/Separated?",
    "How Often Did Your Parents Beat Each Other Up?",
    "How Often Did A Parent Physically Hurt You In Any Way?",
    "How Often Did A Parent Swear At You?",
    "How Often Did Anyone Ever Touch You Sexually?",
    "How Often Did Anyone Make You Touch Them Sexually?",
    "How Often Did Anyone Ever Force You to Have Sex?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryEntry {
    pub code: String,
    pub label: String,
}

/// Code → label pairs, kept sorted by code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDictionary {
    entries: Vec<DictionaryEntry>,
}

impl VariableDictionary {
    /// Pairs two parallel sequences. Unequal lengths are a data-entry defect and are rejected.
    pub fn from_parallel<C, L>(codes: &[C], labels: &[L]) -> Result<Self>
    where
        C: AsRef<str>,
        L: AsRef<str>,
    {
        if codes.len() != labels.len() {
            return Err(ReportError::DictionaryLengthMismatch {
                codes: codes.len(),
                labels: labels.len(),
            });
        }

        Ok(Self::from_pairs(
            codes
                .iter()
                .zip(labels)
                .map(|(code, label)| (code.as_ref(), label.as_ref())),
        ))
    }

    pub fn builtin() -> Self {
        Self::from_pairs(VARIABLE_NAMES.into_iter().zip(LABELS))
    }

    fn from_pairs<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> Self {
        let mut entries: Vec<DictionaryEntry> = pairs
            .map(|(code, label)| DictionaryEntry {
                code: code.to_string(),
                label: label.to_string(),
            })
            .collect();
        entries.sort_by(|a, b| a.code.cmp(&b.code));
        Self { entries }
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table cells with the header row first.
    pub fn table_rows(&self) -> Vec<[&str; 2]> {
        std::iter::once([HEADER.0, HEADER.1])
            .chain(
                self.entries
                    .iter()
                    .map(|entry| [entry.code.as_str(), entry.label.as_str()]),
            )
            .collect()
    }
}
