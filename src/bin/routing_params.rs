use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use clap::Parser;
use request_params::{
    HttpBinding, REQUEST_PARAMS_HEADER, RoutingParameter, RoutingPlan, RoutingSpec,
};
use tracing::info;

/// Compute the routing header of an RPC request from its routing declaration and field values.
#[derive(Debug, Parser)]
#[command(name = "routing-params", version)]
struct Args {
    /// Explicit routing parameter. Repeat in declaration order; later parameters win.
    #[arg(long = "param", value_name = "FIELD[=TEMPLATE][@KEY]", value_parser = parse_param)]
    params: Vec<RoutingParameter>,

    /// Primary HTTP URI template, used when no --param is given.
    #[arg(long, value_name = "TEMPLATE")]
    http: Option<String>,

    /// Additional HTTP binding URI template.
    #[arg(long = "additional-binding", value_name = "TEMPLATE", requires = "http")]
    additional_bindings: Vec<String>,

    /// Request field value.
    #[arg(long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Prefix the output with the metadata key.
    #[arg(long)]
    with_key: bool,
}

fn parse_param(arg: &str) -> Result<RoutingParameter, String> {
    let (declaration, key) = match arg.rsplit_once('@') {
        Some((declaration, key)) if !key.is_empty() => (declaration, Some(key)),
        Some(_) => return Err(format!("empty key in '{arg}'")),
        None => (arg, None),
    };
    let (field, path_template) = match declaration.split_once('=') {
        Some((field, template)) => (field, Some(template)),
        None => (declaration, None),
    };
    if field.is_empty() {
        return Err(format!("missing field name in '{arg}'"));
    }

    Ok(RoutingParameter::builder()
        .field(field)
        .maybe_path_template(path_template)
        .maybe_key(key)
        .build())
}

fn parse_field(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let args = Args::parse();

    let spec = match (args.params.is_empty(), args.http) {
        (false, _) => RoutingSpec::Explicit(args.params),
        (true, Some(template)) => RoutingSpec::Implicit(
            HttpBinding::builder()
                .template(template)
                .additional_bindings(args.additional_bindings)
                .build(),
        ),
        (true, None) => bail!("either --param or --http is required"),
    };

    let plan = RoutingPlan::compile(&spec).context("invalid routing declaration")?;
    info!(
        source = ?plan.source(),
        rules = plan.rules().len(),
        "Routing plan compiled"
    );

    let fields: HashMap<String, String> = args.fields.into_iter().collect();

    match plan.route(&fields) {
        Some(header) if args.with_key => println!("{REQUEST_PARAMS_HEADER}: {header}"),
        Some(header) => println!("{header}"),
        None => info!("No routing header for this request"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param_forms() {
        let param = parse_param("parent").unwrap();
        assert_eq!(param.field, "parent");
        assert_eq!(param.path_template, None);
        assert_eq!(param.key, None);

        let param = parse_param("parent={project=projects/*}/**").unwrap();
        assert_eq!(param.field, "parent");
        assert_eq!(param.path_template.as_deref(), Some("{project=projects/*}/**"));

        let param = parse_param("name=tables/{t=*}@routing_id").unwrap();
        assert_eq!(param.path_template.as_deref(), Some("tables/{t=*}"));
        assert_eq!(param.key.as_deref(), Some("routing_id"));
    }

    #[test]
    fn test_parse_param_errors() {
        assert!(parse_param("=projects/*").is_err());
        assert!(parse_param("parent@").is_err());
    }

    #[test]
    fn test_parse_field() {
        assert_eq!(
            parse_field("parent=projects/1").unwrap(),
            ("parent".to_string(), "projects/1".to_string())
        );
        assert_eq!(
            parse_field("filter=a=b").unwrap(),
            ("filter".to_string(), "a=b".to_string())
        );
        assert!(parse_field("parent").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "routing-params",
            "--http",
            "/v1/{parent=projects/*}/topics",
            "--additional-binding",
            "/v1/{parent=folders/*}/topics",
            "--field",
            "parent=projects/p",
        ])
        .unwrap();

        assert!(args.params.is_empty());
        assert_eq!(args.additional_bindings.len(), 1);
        assert_eq!(args.fields.len(), 1);
    }
}
