use serde::Serialize;

/// One rejected input location, shaped like `{"loc": [...], "msg": ..., "type": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ValidationIssue {
    pub(crate) loc: Vec<String>,
    pub(crate) msg: String,
    #[serde(rename = "type")]
    pub(crate) kind: String,
}

impl ValidationIssue {
    pub(crate) fn new<const N: usize>(
        loc: [&str; N],
        msg: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            loc: loc.iter().map(|segment| segment.to_string()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }

    pub(crate) fn missing(loc: &str, field: &str) -> Self {
        Self::new([loc, field], "Field required", "missing")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub(crate) struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub(crate) fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }

    pub(crate) fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub(crate) fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Pairs two independent parse results, reporting the failures of both.
    pub(crate) fn combine<A, B, EA, EB>(
        first: Result<A, EA>,
        second: Result<B, EB>,
    ) -> Result<(A, B), ValidationErrors>
    where
        EA: Into<ValidationErrors>,
        EB: Into<ValidationErrors>,
    {
        match (first, second) {
            (Ok(first), Ok(second)) => Ok((first, second)),
            (first, second) => {
                let mut errors = Self::default();
                if let Err(err) = first {
                    errors.extend(err.into());
                }
                if let Err(err) = second {
                    errors.extend(err.into());
                }
                Err(errors)
            }
        }
    }

    /// Flattens `validator` field errors under `root` (`query`, `body`, ...).
    pub(crate) fn from_validator(root: &str, errors: &validator::ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| field.to_string());

        let mut collected = Self::default();
        for (field, field_errors) in fields {
            let field = field.to_string();
            for error in field_errors.iter() {
                let msg = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"));
                let kind = error.code.to_string();
                collected.push(ValidationIssue::new([root, field.as_str()], msg, kind));
            }
        }
        collected
    }
}

impl From<ValidationIssue> for ValidationErrors {
    fn from(issue: ValidationIssue) -> Self {
        Self(vec![issue])
    }
}
