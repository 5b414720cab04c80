/// Tests for machine-readable messages
#[cfg(test)]
mod tests {
    use crate::hooks::Hook;
    use crate::json::*;
    use crate::streams::Streams;
    use crate::types::{ChangeAction, Diagnostic, OutputValue};
    use crate::view::View;
    use serde_json::{Value, json};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn parse_lines(text: &str) -> Vec<Value> {
        text.lines().map(|l| serde_json::from_str(l).expect("each line is a JSON object")).collect()
    }

    #[test]
    fn test_envelope_fields() {
        let msg = message(Level::Warn, "hello", "log", json!({ "extra": 1 }));
        assert_eq!(msg["@level"], "warn");
        assert_eq!(msg["@message"], "hello");
        assert_eq!(msg["@module"], MODULE);
        assert_eq!(msg["type"], "log");
        assert_eq!(msg["extra"], 1);
        assert!(msg["@timestamp"].as_str().is_some_and(|t| t.ends_with('Z')));
    }

    #[test]
    fn test_outputs_message() {
        let mut outputs = BTreeMap::new();
        outputs.insert("foo".to_string(), OutputValue::new("secret"));
        outputs.insert("ports".to_string(), OutputValue::sensitive(json!([80, 443])));

        let msg = outputs_message(&outputs);
        assert_eq!(msg["@message"], "Outputs: 2");
        assert_eq!(msg["outputs"]["foo"], json!({ "sensitive": false, "type": "string", "value": "secret" }));
        assert_eq!(msg["outputs"]["ports"]["sensitive"], true);
        assert_eq!(msg["outputs"]["ports"]["type"], "list");
        assert_eq!(msg["outputs"]["ports"]["value"], json!([80, 443]));
    }

    #[test]
    fn test_diagnostic_message() {
        let msg = diagnostic_message(&Diagnostic::error("Invalid thing", Some("More.".to_string())));
        assert_eq!(msg["@level"], "error");
        assert_eq!(msg["@message"], "Error: Invalid thing");
        assert_eq!(msg["diagnostic"]["severity"], "error");
        assert_eq!(msg["diagnostic"]["detail"], "More.");
    }

    #[test]
    fn test_hook_messages() {
        let (streams, captured) = Streams::for_testing();
        let hook = JsonHook::new(Arc::new(View::new(streams)));

        hook.pre_apply("aws_instance.a", ChangeAction::Create);
        hook.post_apply("aws_instance.a", ChangeAction::Create, None);
        hook.pre_apply("aws_instance.b", ChangeAction::Delete);
        hook.post_apply("aws_instance.b", ChangeAction::Delete, Some("in use"));

        let msgs = parse_lines(&captured.stdout());
        let types: Vec<&str> = msgs.iter().filter_map(|m| m["type"].as_str()).collect();
        assert_eq!(types, vec!["apply_start", "apply_complete", "apply_start", "apply_errored"]);

        assert_eq!(msgs[0]["hook"]["resource"]["addr"], "aws_instance.a");
        assert_eq!(msgs[0]["hook"]["action"], "create");
        assert_eq!(msgs[1]["@message"], "aws_instance.a: Creation complete after 0s");
        assert_eq!(msgs[3]["@level"], "error");
        assert_eq!(msgs[3]["hook"]["error"], "in use");
    }

    #[test]
    fn test_hook_skips_noop() {
        let (streams, captured) = Streams::for_testing();
        let hook = JsonHook::new(Arc::new(View::new(streams)));

        hook.pre_apply("aws_instance.a", ChangeAction::NoOp);
        hook.post_apply("aws_instance.a", ChangeAction::NoOp, None);

        assert_eq!(captured.stdout(), "");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(type_name(&json!(null)), "dynamic");
        assert_eq!(type_name(&json!(true)), "bool");
        assert_eq!(type_name(&json!(1)), "number");
        assert_eq!(type_name(&json!({})), "map");
    }
}
