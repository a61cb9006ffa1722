#[cfg(test)]
mod tests {
    use crate::analyze::ComponentRecord;
    use crate::config::GeneratorConfig;
    use crate::emit::{module_specifier, render_declarations};
    use std::path::{Path, PathBuf};

    fn config() -> GeneratorConfig {
        GeneratorConfig::new("/project")
    }

    fn record(
        class: &str,
        tag: &str,
        interface: Option<&str>,
        file: &str,
        default: bool,
    ) -> ComponentRecord {
        ComponentRecord {
            class_name: class.to_string(),
            tag_name: tag.to_string(),
            interface_type: interface.map(|s| s.to_string()),
            file_path: PathBuf::from(file),
            is_default_export: default,
        }
    }

    #[test]
    fn test_empty_tree_output() {
        let output = render_declarations(&[], &config());
        let expected = r#"// Generated by component-typegen. Do not edit by hand.

type AdditionalTypes = Partial<Omit<HTMLElement, "style">> & {
  ref?: (element: HTMLElement) => void;
  style?: Partial<CSSStyleDeclaration>;
  children?: unknown;
};

declare global {
  interface HTMLElementTagNameMap {}
  namespace JSX {
    interface IntrinsicElements {}
  }
}

export {};
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_full_output() {
        let records = vec![
            record("Foo", "foo-el", Some("IFooProps"), "/project/src/foo.ts", true),
            record("Bar", "bar-el", None, "/project/src/nested/bar.tsx", false),
        ];
        let output = render_declarations(&records, &config());
        let expected = r#"// Generated by component-typegen. Do not edit by hand.

import Foo from "./src/foo";
import { Bar } from "./src/nested/bar";

type AdditionalTypes = Partial<Omit<HTMLElement, "style">> & {
  ref?: (element: HTMLElement) => void;
  style?: Partial<CSSStyleDeclaration>;
  children?: unknown;
};

declare global {
  interface HTMLElementTagNameMap {
    "foo-el": Foo;
    "bar-el": Bar;
  }
  namespace JSX {
    interface IntrinsicElements {
      "foo-el": import("./src/foo").IFooProps & AdditionalTypes;
      "bar-el": AdditionalTypes;
    }
  }
}

export {};
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_tag_collision_keeps_last_at_first_position() {
        let records = vec![
            record("First", "dup-el", None, "/project/src/a.ts", false),
            record("Other", "other-el", None, "/project/src/b.ts", false),
            record("Second", "dup-el", None, "/project/src/c.ts", false),
        ];
        let output = render_declarations(&records, &config());
        assert_eq!(output.matches(r#""dup-el": "#).count(), 2);
        assert!(output.contains(r#""dup-el": Second;"#));
        assert!(!output.contains(r#""dup-el": First;"#));
        assert!(output.find(r#""dup-el""#) < output.find(r#""other-el""#));
        // every record is still imported
        assert!(output.contains(r#"import { First } from "./src/a";"#));
    }

    #[test]
    fn test_tag_names_are_escaped() {
        let records = vec![record("Q", "q\"el", None, "/project/src/q.ts", false)];
        let output = render_declarations(&records, &config());
        assert!(output.contains(r#""q\"el": Q;"#));
    }

    #[test]
    fn test_registry_keys_are_always_quoted() {
        let records = vec![record("Plain", "plain", None, "/project/src/plain.ts", false)];
        let output = render_declarations(&records, &config());
        assert!(output.contains(r#"    "plain": Plain;"#));
        assert!(output.contains(r#"      "plain": AdditionalTypes;"#));
        assert!(!output.contains("    plain: "));
        // auxiliary members stay bare
        assert!(output.contains("  ref?: (element: HTMLElement) => void;"));
    }

    #[test]
    fn test_module_specifier() {
        let root = Path::new("/project");
        assert_eq!(module_specifier(Path::new("/project/src/a.ts"), root), "./src/a");
        assert_eq!(
            module_specifier(Path::new("/project/src/x.component.tsx"), root),
            "./src/x.component"
        );
        assert_eq!(module_specifier(Path::new("/elsewhere/b.ts"), root), "../elsewhere/b");
        assert_eq!(
            module_specifier(Path::new("/shared/ui/c.ts"), Path::new("/repo/app")),
            "../../shared/ui/c"
        );
        assert_eq!(module_specifier(Path::new("/project/.hidden.ts"), root), "./.hidden");
    }

    #[test]
    fn test_output_is_deterministic() {
        let records = vec![
            record("A", "a-el", Some("AProps"), "/project/src/a.ts", false),
            record("B", "b-el", None, "/project/src/b.ts", true),
        ];
        assert_eq!(
            render_declarations(&records, &config()),
            render_declarations(&records, &config())
        );
    }
}
