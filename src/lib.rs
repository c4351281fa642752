pub mod error;
pub mod input;
pub mod protocol;
pub mod technique;

use std::hint::black_box;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

pub use crate::{
    error::{Error, Result},
    input::InputSet,
    protocol::MeasurementProtocol,
    technique::{Concatenation, Technique},
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuiteKind {
    Ten,
    Hundred,
}

impl SuiteKind {
    pub const fn from_size(size: usize) -> Option<Self> {
        match size {
            10 => Some(Self::Ten),
            100 => Some(Self::Hundred),
            _ => None,
        }
    }

    #[inline]
    pub const fn size(&self) -> usize {
        match self {
            Self::Ten => 10,
            Self::Hundred => 100,
        }
    }

    #[inline]
    pub const fn legacy_skip(&self) -> Option<usize> {
        match self {
            Self::Ten => Some(8),
            Self::Hundred => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    pub kind: SuiteKind,
    pub legacy_skip: Option<usize>,
    pub protocol: MeasurementProtocol,
}

impl Default for Suite {
    fn default() -> Self {
        Self::ten()
    }
}

impl Suite {
    #[inline]
    pub fn new(kind: SuiteKind) -> Self {
        Self {
            kind,
            legacy_skip: kind.legacy_skip(),
            protocol: Default::default(),
        }
    }

    #[inline]
    pub fn ten() -> Self {
        Self::new(SuiteKind::Ten)
    }

    #[inline]
    pub fn ten_corrected() -> Self {
        Self {
            legacy_skip: None,
            ..Self::ten()
        }
    }

    #[inline]
    pub fn hundred() -> Self {
        Self::new(SuiteKind::Hundred)
    }

    pub fn group_name(&self) -> String {
        format!("concat/{}", self.kind.size())
    }

    pub fn setup(&self) -> Result<InputSet> {
        let input = InputSet::generate(self.kind.size())?;
        debug!(suite = %self.group_name(), "prepared input set");
        Ok(input)
    }

    /// Generates the input once; every [`Workload::run`] reuses it.
    pub fn workload(&self, technique: Technique) -> Result<Workload<'_>> {
        Ok(Workload {
            suite: self,
            technique,
            input: self.setup()?,
        })
    }

    #[inline]
    pub fn run(&self, technique: Technique, input: &InputSet) -> String {
        match self.legacy_skip {
            Some(index) if technique.skips_legacy_token() => {
                technique.concat_skipping(input.tokens(), index)
            }
            _ => technique.concat(input.tokens()),
        }
    }

    pub fn expected(&self, technique: Technique, input: &InputSet) -> String {
        match self.legacy_skip {
            Some(index) if technique.skips_legacy_token() => input
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != index)
                .map(|(_, token)| token.as_str())
                .collect(),
            _ => input.tokens().concat(),
        }
    }

    pub fn verify(&self, input: &InputSet) -> Result<()> {
        for technique in Technique::extended() {
            let combined = self.run(technique, input);
            if combined != self.expected(technique, input) {
                warn!(%technique, suite = %self.group_name(), "unexpected output");
                return Err(Error::Mismatch { technique });
            }
            trace!(%technique, len = combined.len(), "verified");
        }
        debug!(suite = %self.group_name(), "all techniques agree");
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct Workload<'a> {
    suite: &'a Suite,
    technique: Technique,
    input: InputSet,
}

impl Workload<'_> {
    #[inline]
    pub fn run(&self) -> String {
        self.suite.run(self.technique, black_box(&self.input))
    }

    #[inline]
    pub fn technique(&self) -> Technique {
        self.technique
    }

    #[inline]
    pub fn input(&self) -> &InputSet {
        &self.input
    }
}

#[cfg(test)]
mod tests {
    use crate::{InputSet, Suite, SuiteKind, Technique};

    fn numbered(len: usize) -> InputSet {
        InputSet::from_tokens((0..len).map(|i| format!("t{i}")))
    }

    #[test]
    fn test_ten_legacy_skip() {
        let suite = Suite::ten();
        let input = numbered(10);
        for technique in Technique::extended() {
            let expected = if technique.skips_legacy_token() {
                "t0t1t2t3t4t5t6t7t9"
            } else {
                "t0t1t2t3t4t5t6t7t8t9"
            };
            let combined = suite.run(technique, &input);
            assert_eq!(expected, combined, "{technique}")
        }
    }

    #[test]
    fn test_ten_corrected() {
        let suite = Suite::ten_corrected();
        let input = numbered(10);
        for technique in Technique::extended() {
            let combined = suite.run(technique, &input);
            assert_eq!("t0t1t2t3t4t5t6t7t8t9", combined, "{technique}")
        }
    }

    #[test]
    fn test_hundred_never_skips() {
        let suite = Suite::hundred();
        let input = numbered(100);
        let expected = input.tokens().concat();
        for technique in Technique::extended() {
            assert_eq!(expected, suite.run(technique, &input), "{technique}")
        }
    }

    #[test]
    fn test_short_input_ignores_skip() {
        let suite = Suite::ten();
        let abc = InputSet::from_tokens(["a", "b", "c"]);
        let empty = InputSet::default();
        for technique in Technique::extended() {
            assert_eq!("abc", suite.run(technique, &abc), "{technique}");
            assert_eq!("", suite.run(technique, &empty), "{technique}")
        }
    }

    #[test]
    fn test_verify_generated() {
        for suite in [Suite::ten(), Suite::ten_corrected(), Suite::hundred()] {
            let input = suite.setup().unwrap();
            assert_eq!(suite.kind.size(), input.len());
            suite.verify(&input).unwrap()
        }
    }

    #[test]
    fn test_workload_reuses_input() {
        let suite = Suite::hundred();
        let workload = suite.workload(Technique::Plus).unwrap();
        let input = workload.input().clone();
        assert_eq!(100, input.len());

        let expected = suite.expected(workload.technique(), &input);
        for _ in 0..3 {
            assert_eq!(expected, workload.run());
        }
        assert_eq!(&input, workload.input())
    }

    #[test]
    fn test_expected_respects_skip() {
        let input = numbered(10);
        assert_eq!(
            "t0t1t2t3t4t5t6t7t9",
            Suite::ten().expected(Technique::Concat, &input)
        );
        assert_eq!(
            "t0t1t2t3t4t5t6t7t8t9",
            Suite::ten().expected(Technique::Join, &input)
        );
    }

    #[test]
    fn test_group_names() {
        assert_eq!("concat/10", Suite::ten().group_name());
        assert_eq!("concat/100", Suite::hundred().group_name());
        assert_eq!(Suite::ten(), Suite::default());
        assert_eq!(None, SuiteKind::Hundred.legacy_skip())
    }

    #[test]
    fn test_fixture_replay() {
        let fixture = ::serde_json::to_string(&numbered(10)).unwrap();
        let input = InputSet::from_reader(fixture.as_bytes()).unwrap();

        let kind = SuiteKind::from_size(input.len()).unwrap();
        assert_eq!(SuiteKind::Ten, kind);
        Suite::new(kind).verify(&input).unwrap();

        assert_eq!(Some(SuiteKind::Hundred), SuiteKind::from_size(100));
        assert_eq!(None, SuiteKind::from_size(3))
    }
}
