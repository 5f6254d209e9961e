use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_PROJECT_PASSWORD: &str = "project-password";

#[derive(Debug)]
pub struct Options {
    pub project_password: Option<SecretString>,
}

impl Options {
    /// Parse gate arguments from matches.
    ///
    /// A missing password is not an error; the server starts with the gate
    /// closed for every protected path.
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        Self {
            project_password: matches
                .get_one::<String>(ARG_PROJECT_PASSWORD)
                .cloned()
                .map(SecretString::from),
        }
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_PROJECT_PASSWORD)
            .long(ARG_PROJECT_PASSWORD)
            .help("Shared password expected in the session-pw cookie")
            .env("PROJECT_PASSWORD")
            .hide_env_values(true),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn password_from_env() {
        temp_env::with_var("PROJECT_PASSWORD", Some("correct-secret"), || {
            let matches = with_args(Command::new("sitegate")).get_matches_from(vec!["sitegate"]);
            let options = Options::parse(&matches);
            assert_eq!(
                options
                    .project_password
                    .as_ref()
                    .map(|secret| secret.expose_secret().to_string()),
                Some("correct-secret".to_string())
            );
        });
    }

    #[test]
    fn password_is_optional() {
        temp_env::with_var("PROJECT_PASSWORD", None::<&str>, || {
            let matches = with_args(Command::new("sitegate")).get_matches_from(vec!["sitegate"]);
            assert!(Options::parse(&matches).project_password.is_none());
        });
    }

    #[test]
    fn password_is_redacted_in_debug() {
        temp_env::with_var("PROJECT_PASSWORD", None::<&str>, || {
            let matches = with_args(Command::new("sitegate")).get_matches_from(vec![
                "sitegate",
                "--project-password",
                "correct-secret",
            ]);
            let options = Options::parse(&matches);
            assert!(!format!("{options:?}").contains("correct-secret"));
        });
    }
}
