/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::Parser;

/// cfn-outputs — print CloudFormation stack outputs.
#[derive(Debug, Parser)]
#[command(
    name = "cfn-outputs",
    about = "Print AWS CloudFormation stack outputs, optionally substituted into a template",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// CloudFormation stack name or ARN.
    #[arg(short = 's', long, value_name = "STACK", env = "CFN_OUTPUTS_STACK")]
    pub stack: String,

    /// Template file in Jinja syntax, e.g. `{{ BucketName }}`
    /// (not Go text/template syntax: `{{.BucketName}}` is rejected).
    /// Every referenced output must exist.
    #[arg(short = 't', long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Write the result to FILE instead of stdout.
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output a JSON object (cannot be combined with --template).
    #[arg(short = 'j', long)]
    pub json: bool,

    /// AWS region; defaults to the environment/profile setting.
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Named AWS profile to take credentials from.
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Log each phase with timings to stderr.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "cfn-outputs", "-s", "my-stack", "-t", "in.tpl", "-o", "out.txt",
        ])
        .unwrap();
        assert_eq!(cli.stack, "my-stack");
        assert_eq!(cli.template, Some(PathBuf::from("in.tpl")));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(!cli.json);
    }

    #[test]
    fn test_json_and_template_parse_together() {
        // Rejected later with a config error, not by clap.
        let cli = Cli::try_parse_from(["cfn-outputs", "-s", "x", "-j", "-t", "a.tpl"]).unwrap();
        assert!(cli.json);
        assert!(cli.template.is_some());
    }

    #[test]
    fn test_template_help_names_syntax() {
        use clap::CommandFactory;

        let cmd = Cli::command();
        let arg = cmd
            .get_arguments()
            .find(|a| a.get_id() == "template")
            .unwrap();
        let help = arg
            .get_long_help()
            .or(arg.get_help())
            .map(ToString::to_string)
            .unwrap_or_default();
        assert!(help.contains("Jinja"));
        assert!(help.contains("not Go text/template syntax"));
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from([
            "cfn-outputs",
            "--stack",
            "arn:aws:cloudformation:eu-west-1:123:stack/app/abc",
            "--json",
            "--region",
            "eu-west-1",
            "--profile",
            "dev",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.region.as_deref(), Some("eu-west-1"));
        assert_eq!(cli.profile.as_deref(), Some("dev"));
    }
}
