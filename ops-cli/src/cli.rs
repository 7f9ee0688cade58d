use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

/// Inspect the authorization taxonomy and run local batch checks
#[derive(Parser, Debug)]
#[command(name = "rebac")]
#[command(about = "Relationship-based authorization operator tool", version)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "REBAC_JSON_LOGS")]
    pub json_logs: bool,

    /// Configuration file path (environment variables prefixed REBAC_ override it)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resource taxonomy and the relation -> types matrix
    Resources,

    /// Parse canonical object strings, e.g. `role:organization/<org>/role/admin`
    Object {
        /// One or more flat object strings
        #[arg(required = true)]
        objects: Vec<String>,
    },

    /// Run a batch check for a user against a local in-memory store
    Check {
        /// Organization the user belongs to
        #[arg(long)]
        org: Uuid,

        /// Id of the user being checked
        #[arg(long)]
        user: String,

        /// JSON file of grants to seed the store with
        #[arg(long)]
        grants: Option<PathBuf>,

        /// Seed the managed admin/editor/viewer role grants first
        #[arg(long)]
        bootstrap: bool,

        /// JSON array of transactions; reads stdin when omitted or `-`
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let args = Args::try_parse_from([
            "rebac",
            "check",
            "--org",
            "00000000-0000-0000-0000-000000000000",
            "--user",
            "alice",
            "--bootstrap",
            "-v",
        ])
        .unwrap();

        assert!(args.verbose);
        match args.command {
            Command::Check {
                org,
                user,
                bootstrap,
                grants,
                input,
            } => {
                assert!(org.is_nil());
                assert_eq!(user, "alice");
                assert!(bootstrap);
                assert!(grants.is_none());
                assert!(input.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_object_requires_arguments() {
        assert!(Args::try_parse_from(["rebac", "object"]).is_err());
        assert!(Args::try_parse_from(["rebac", "check", "--org", "not-a-uuid", "--user", "a"]).is_err());
    }
}
