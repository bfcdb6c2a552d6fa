/// An unvalidated question record as it arrives from any source.
///
/// `options` may or may not contain `correct`; the normalizer treats every
/// option that differs from `correct` as a wrong answer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl RawQuestion {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct: correct.into(),
        }
    }
}
