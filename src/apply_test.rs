/// Tests for the apply and destroy views
///
/// Most value formatting is covered in format_test; these check what each
/// view writes, and to which stream.

#[cfg(test)]
mod tests {
    use crate::apply::*;
    use crate::hooks::{CountHook, Hook, ResourceCounts};
    use crate::streams::{Captured, Streams};
    use crate::types::{ApplyOptions, ChangeAction, OutputValue, ViewKind};
    use crate::view::View;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn build(kind: ViewKind, destroy: bool, in_automation: bool) -> (Box<dyn ApplyView>, Arc<CountHook>, Captured) {
        let (streams, captured) = Streams::for_testing();
        let view = Arc::new(View::new(streams));
        let (apply, count) = new_apply(kind, ApplyOptions { destroy, in_automation }, view);
        (apply, count, captured)
    }

    /// Feed the counts through the registered hooks, the way the engine would
    fn drive(hooks: &[Arc<dyn Hook>], added: usize, changed: usize, removed: usize) {
        let plan = [(ChangeAction::Create, added), (ChangeAction::Update, changed), (ChangeAction::Delete, removed)];
        for (action, n) in plan {
            for i in 0..n {
                let addr = format!("null_resource.{}_{}", action.as_str(), i);
                for hook in hooks {
                    hook.pre_apply(&addr, action);
                }
                for hook in hooks {
                    hook.post_apply(&addr, action, None);
                }
            }
        }
    }

    // Two consecutive boolean arguments are easy to swap; check both land.
    #[test]
    fn test_new_apply_keeps_flags() {
        for destroy in [false, true] {
            for in_automation in [false, true] {
                let (apply, _count, _captured) = build(ViewKind::Human, destroy, in_automation);
                assert_eq!(apply.kind(), ViewKind::Human);
                assert_eq!(apply.options(), ApplyOptions { destroy, in_automation });
            }
        }
    }

    #[test]
    fn test_new_apply_json_kind() {
        let (apply, _count, _captured) = build(ViewKind::Json, true, false);
        assert_eq!(apply.kind(), ViewKind::Json);
        assert!(apply.options().destroy);
    }

    #[test]
    fn test_human_outputs() {
        let (apply, _count, captured) = build(ViewKind::Human, false, false);

        let mut outputs = BTreeMap::new();
        outputs.insert("foo".to_string(), OutputValue::new("secret"));
        apply.outputs(&outputs);

        let got = captured.stdout();
        for want in ["Outputs:", "foo = \"secret\""] {
            assert!(got.contains(want), "wrong result\ngot:  {:?}\nwant: {:?}", got, want);
        }
        assert_eq!(captured.stderr(), "");
    }

    #[test]
    fn test_human_outputs_empty() {
        let (apply, _count, captured) = build(ViewKind::Human, false, false);
        apply.outputs(&BTreeMap::new());

        assert_eq!(captured.stdout(), "", "output should be empty");
    }

    #[test]
    fn test_human_outputs_sensitive_rendered() {
        let (apply, _count, captured) = build(ViewKind::Human, false, false);

        let mut outputs = BTreeMap::new();
        outputs.insert("token".to_string(), OutputValue::sensitive("abc123"));
        apply.outputs(&outputs);

        assert!(captured.stdout().contains("token = \"abc123\""));
    }

    #[test]
    fn test_human_operation_carries_automation_flag() {
        for in_automation in [false, true] {
            let (apply, _count, _captured) = build(ViewKind::Human, false, in_automation);
            let op = apply.operation();
            assert_eq!(op.kind(), ViewKind::Human);
            assert_eq!(op.in_automation(), in_automation);
        }
    }

    // The same view serves apply and destroy, so the help has to name the right one.
    #[test]
    fn test_human_help() {
        for (name, destroy) in [("apply", false), ("destroy", true)] {
            let (apply, _count, captured) = build(ViewKind::Human, destroy, false);
            apply.help_prompt();

            let got = captured.stderr();
            assert!(got.contains(name), "wrong result\ngot:  {:?}\nwant: {:?}", got, name);
            assert!(got.contains(&format!("terraform {} -help", name)));
            assert_eq!(captured.stdout(), "");
        }
    }

    #[test]
    fn test_hooks_contain_exactly_one_count_hook() {
        for kind in [ViewKind::Human, ViewKind::Json] {
            let (apply, count, _captured) = build(kind, false, false);
            let hooks = apply.hooks();

            let count_ptr = Arc::as_ptr(&count) as *const ();
            let matching = hooks.iter().filter(|h| Arc::as_ptr(*h) as *const () == count_ptr).count();
            assert_eq!(matching, 1, "expected the count hook exactly once for {}", kind);
            assert!(Arc::ptr_eq(&apply.count_hook(), &count));
            assert_eq!(count.counts(), ResourceCounts::default());
        }
    }

    #[test]
    fn test_human_resource_count_apply() {
        let (apply, count, captured) = build(ViewKind::Human, false, false);
        drive(&apply.hooks(), 1, 2, 3);
        assert_eq!(count.counts(), ResourceCounts { added: 1, changed: 2, removed: 3 });

        apply.resource_count();

        let got = captured.stdout();
        let want = "Apply complete! Resources: 1 added, 2 changed, 3 destroyed.";
        assert!(got.contains(want), "wrong result\ngot:  {:?}\nwant: {:?}", got, want);
    }

    #[test]
    fn test_human_resource_count_destroy() {
        let (apply, _count, captured) = build(ViewKind::Human, true, false);
        drive(&apply.hooks(), 0, 0, 3);

        apply.resource_count();

        let got = captured.stdout();
        assert!(got.contains("Destroy complete! Resources: 3 destroyed."), "got: {:?}", got);
        assert!(!got.contains("added"));
        assert!(!got.contains("changed"));
    }

    #[test]
    fn test_destroy_summary_ignores_added_and_changed() {
        let options = ApplyOptions { destroy: true, in_automation: false };
        let counts = ResourceCounts { added: 5, changed: 6, removed: 1 };
        assert_eq!(summary_sentence(options, counts), "Destroy complete! Resources: 1 destroyed.");
    }

    #[test]
    fn test_human_resource_count_printed_when_zero() {
        let (apply, _count, captured) = build(ViewKind::Human, false, false);
        apply.resource_count();

        assert!(captured.stdout().contains("Apply complete! Resources: 0 added, 0 changed, 0 destroyed."));
    }

    #[test]
    fn test_json_resource_count() {
        let (apply, count, captured) = build(ViewKind::Json, false, true);
        drive(&[count.clone() as Arc<dyn Hook>], 1, 2, 3);
        apply.resource_count();

        let msg: serde_json::Value = serde_json::from_str(captured.stdout().trim()).expect("one JSON line");
        assert_eq!(msg["type"], "change_summary");
        assert_eq!(msg["@message"], "Apply complete! Resources: 1 added, 2 changed, 3 destroyed.");
        assert_eq!(msg["changes"], json!({ "add": 1, "change": 2, "remove": 3, "operation": "apply" }));
    }

    #[test]
    fn test_json_outputs_and_help() {
        let (apply, _count, captured) = build(ViewKind::Json, false, false);
        apply.outputs(&BTreeMap::new());
        apply.help_prompt();
        assert_eq!(captured.stdout(), "");
        assert_eq!(captured.stderr(), "");

        let mut outputs = BTreeMap::new();
        outputs.insert("foo".to_string(), OutputValue::new("secret"));
        apply.outputs(&outputs);

        let msg: serde_json::Value = serde_json::from_str(captured.stdout().trim()).expect("one JSON line");
        assert_eq!(msg["type"], "outputs");
        assert_eq!(msg["outputs"]["foo"]["value"], "secret");
    }

    #[test]
    fn test_json_operation_carries_automation_flag() {
        let (apply, _count, _captured) = build(ViewKind::Json, false, true);
        let op = apply.operation();
        assert_eq!(op.kind(), ViewKind::Json);
        assert!(op.in_automation());
    }
}
