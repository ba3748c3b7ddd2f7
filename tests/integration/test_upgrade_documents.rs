use cwl_upgrader::core::{assemble, load_path, load_str, upgrade_document, Node, UpgradeError};
use std::path::{Path, PathBuf};

fn fixture(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/draft3")
        .join(relative)
}

fn upgrade_fixture(relative: &str) -> String {
    let doc = load_path(&fixture(relative)).unwrap();
    assemble(upgrade_document(doc).unwrap())
}

#[test]
fn test_workflow_upgrade() {
    insta::assert_snapshot!(upgrade_fixture("count-lines.cwl"), @r"
    class: Workflow
    cwlVersion: v1.0
    doc: Count the lines of a file
    requirements:
      - class: InlineJavascriptRequirement
    inputs:
      file1:
        type: File
      pattern:
        type: string?
    steps:
      step1:
        run: tools/wc-tool.cwl
        in:
          file1: file1
        out:
          - output
      step2:
        run: tools/parseInt-tool.cwl
        in:
          file1: step1/output
        out:
          - output
    outputs:
      count_output:
        type: int
        outputSource: step2/output
    ");
}

#[test]
fn test_command_line_tool_upgrade() {
    insta::assert_snapshot!(upgrade_fixture("tools/wc-tool.cwl"), @r"
    class: CommandLineTool
    cwlVersion: v1.0
    doc: |-
      Count lines in the given file.
      The result is written to the captured stdout stream.
    inputs:
      file1:
        type: File
        inputBinding:
          position: 1
    outputs:
      output:
        type: File
        outputBinding:
          glob: output
    baseCommand:
      - wc
      - -l
    stdout: output
    ");
}

#[test]
fn test_expression_tool_upgrade() {
    insta::assert_snapshot!(upgrade_fixture("tools/parseInt-tool.cwl"), @r#"
    class: ExpressionTool
    cwlVersion: v1.0
    requirements:
      InlineJavascriptRequirement: {}
    inputs:
      file1:
        type: File
        inputBinding:
          loadContents: true
    expression: "$({'output': parseInt(inputs.file1.contents)})"
    outputs:
      output:
        type: int
    "#);
}

#[test]
fn test_output_reloads_as_same_tree() {
    for relative in ["count-lines.cwl", "tools/wc-tool.cwl", "tools/parseInt-tool.cwl"] {
        let doc = upgrade_document(load_path(&fixture(relative)).unwrap()).unwrap();
        let text = assemble(doc.clone());
        let reloaded = load_str(&text).unwrap();
        assert_eq!(
            reloaded.get("cwlVersion"),
            Some(&Node::from("v1.0")),
            "{relative}"
        );
        assert_eq!(
            reloaded.get("inputs"),
            doc.get("inputs"),
            "inputs of {relative} changed on reload"
        );
    }
}

#[test]
fn test_scatter_and_nested_types() {
    let doc = load_str(
        r##"
class: Workflow
inputs:
  - id: "#files"
    type: {type: array, items: {type: array, items: File}}
  - id: "#maybe_list"
    type: ["null", {type: array, items: string}]
outputs: []
steps:
  - id: "#count"
    run: tools/wc-tool.cwl
    scatter: "#count.file1"
    inputs:
      - id: "#count.file1"
        source: "#files"
    outputs:
      - id: "#count.output"
"##,
    )
    .unwrap();
    let upgraded = upgrade_document(doc).unwrap();

    let inputs = upgraded.get("inputs").unwrap();
    assert_eq!(
        inputs.get("files").and_then(|f| f.get("type")),
        Some(&Node::from("File[][]"))
    );
    assert_eq!(
        inputs.get("maybe_list").and_then(|f| f.get("type")),
        Some(&Node::from("string[]?"))
    );
    let step = upgraded.get("steps").and_then(|s| s.get("count")).unwrap();
    assert_eq!(step.get("scatter"), Some(&Node::from("file1")));
    assert_eq!(
        step.get("in").and_then(|i| i.get("file1")),
        Some(&Node::from("files"))
    );
}

#[test]
fn test_malformed_documents_are_rejected() {
    let no_class = upgrade_document(load_str("inputs: []\n").unwrap()).unwrap_err();
    assert!(matches!(no_class, UpgradeError::MissingClass));

    let step_without_id = upgrade_document(
        load_str("class: Workflow\nsteps:\n  - run: a.cwl\n    extra: 1\n").unwrap(),
    )
    .unwrap_err();
    assert!(matches!(
        step_without_id,
        UpgradeError::MissingField { field: "id", .. }
    ));
}
