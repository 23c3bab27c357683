use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Malformed notification envelope"))]
    MalformedEnvelope { source: serde_json::Error },

    #[snafu(display("Malformed message body"))]
    MalformedBody { source: serde_json::Error },

    #[snafu(display("Malformed message attribute {name}: {reason}"))]
    MalformedAttribute { name: String, reason: String },

    #[snafu(display("Invalid consumer configuration"))]
    Config { source: envy::Error },
}

impl Error {
    pub fn malformed_attribute(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAttribute {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
