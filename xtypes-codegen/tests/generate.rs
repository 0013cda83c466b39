//! Batch generation tests on temporary directories.

use std::fs;
use std::path::Path;
use xtypes_codegen::{
    ArtifactKind, CodegenError, Generator, GeneratorConfig, WriteOutcome, generate_from_path,
};
use xtypes_schema::{Language, ResolveError, SchemaError, TypeError};

fn write_schema(dir: &Path, name: &str, yaml: &str) {
    fs::write(dir.join(name), yaml).expect("Failed to write schema");
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).expect("Failed to read artifact")
}

#[test]
fn test_single_class_end_to_end() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("schemas");
    let output = dir.path().join("out");
    fs::create_dir(&input).expect("Failed to create dir");
    write_schema(
        &input,
        "widget.yml",
        "name: Widget\nproperties:\n  label:\n    type: STRING\n    default: x\n",
    );

    let config = GeneratorConfig::new("robot").output_dir(&output);
    let summary = generate_from_path(&config, &input).expect("Failed to generate");
    assert_eq!(summary.order.classes, vec!["Widget"]);
    assert!(summary.order.namespace_dependencies.is_empty());

    let source = read(output.join("src/_Widget.cpp"));
    assert!(source.contains(
        "this->define_property(\"label\", nl::json::value_t::string, {}, \"x\");"
    ));
    assert!(read(output.join("include/_Widget.hpp")).contains("class _Widget"));
    assert!(read(output.join("pybind/pyWidget.cpp")).contains("robot::Widget"));
    assert!(read(output.join("python/Widget.pyi")).contains("class Widget(XType):"));
    assert!(read(output.join("pybind/pybind11_module.cpp")).contains("PYBIND11_INIT_ROBOT__WIDGET(m);"));
    assert!(read(output.join("include/xtypes.hpp")).contains("#include \"Widget.hpp\""));

    // No skeleton directory configured.
    assert!(!output.join("include/Widget.hpp").exists());
}

#[test]
fn test_parent_ordered_before_child() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "a_derived.yaml", "name: Derived\ninherit: Base\n");
    write_schema(dir.path(), "b_base.yaml", "name: Base\n");

    let config = GeneratorConfig::new("robot").output_dir(dir.path().join("out"));
    let summary = generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert_eq!(summary.order.classes, vec!["Base", "Derived"]);

    let module = read(dir.path().join("out/pybind/pybind11_module.cpp"));
    let base = module.find("PYBIND11_INIT_ROBOT__BASE(m);").expect("base init");
    let derived = module.find("PYBIND11_INIT_ROBOT__DERIVED(m);").expect("derived init");
    assert!(base < derived);
}

#[test]
fn test_second_run_writes_nothing() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(
        dir.path(),
        "arm.yaml",
        "name: Arm\nrelations:\n  frame:\n    type: HAS\n    other_classnames: [geometry::Frame]\n",
    );
    let config = GeneratorConfig::new("robot")
        .output_dir(dir.path().join("out"))
        .skeleton_dir(Some(dir.path().join("skel")));

    let first = generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert!(first.artifacts.written_count() > 0);
    assert_eq!(first.order.dependency_line(), "geometry");

    let second = generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert_eq!(second.artifacts.written_count(), 0);
    assert_eq!(second.artifacts.with_outcome(WriteOutcome::Preserved).len(), 2);
}

#[test]
fn test_skeleton_preserved_and_overwritten() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "arm.yaml", "name: Arm\n");
    let skeletons = dir.path().join("skel");
    let config = GeneratorConfig::new("robot")
        .output_dir(dir.path().join("out"))
        .skeleton_dir(Some(skeletons.clone()))
        .languages([Language::Cpp]);

    generate_from_path(&config, dir.path()).expect("Failed to generate");
    let skeleton = skeletons.join("src/Arm.cpp");
    assert!(read(&skeleton).contains("Arm::Arm(const std::string& classname)"));

    fs::write(&skeleton, "// my implementation\n").expect("Failed to edit skeleton");
    generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert_eq!(read(&skeleton), "// my implementation\n");

    let config = config.overwrite_skeletons(true);
    generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert!(read(&skeleton).contains("Arm::Arm"));
}

#[test]
fn test_duplicate_member_aborts_batch() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "a.yaml", "name: A\n");
    write_schema(
        dir.path(),
        "b.yaml",
        "name: B\nproperties:\n  x:\n    type: STRING\nrelations:\n  x:\n    type: HAS\n    other_classnames: [A]\n",
    );
    let output = dir.path().join("out");
    let config = GeneratorConfig::new("robot").output_dir(&output);

    let err = generate_from_path(&config, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::Resolve {
            source: ResolveError::DuplicateName { .. },
            ..
        })
    ));
    assert!(!output.exists());
}

#[test]
fn test_set_of_references_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(
        dir.path(),
        "a.yaml",
        "name: A\nrelations:\n  parts:\n    type: SET(XTYPE(Part))\n    other_classnames: [Part]\n",
    );
    let config = GeneratorConfig::new("robot").output_dir(dir.path().join("out"));

    let err = generate_from_path(&config, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::Resolve {
            source: ResolveError::Type(TypeError::InvalidContainerOfReference { .. }),
            ..
        })
    ));
}

#[test]
fn test_missing_parent_reported() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "a.yaml", "name: A\ninherit: Missing\n");
    let config = GeneratorConfig::new("robot").output_dir(dir.path().join("out"));

    let err = generate_from_path(&config, dir.path()).unwrap_err();
    assert!(matches!(
        err,
        CodegenError::Schema(SchemaError::UnresolvedParent { .. })
    ));
}

#[test]
fn test_root_document_only_binds() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "xtype.yaml", "name: XType\nproperties:\n  uri:\n    type: STRING\n");
    let output = dir.path().join("out");
    let config = GeneratorConfig::new("xtypes_generator")
        .output_dir(&output)
        .create_project_registry(false);

    let summary = generate_from_path(&config, dir.path()).expect("Failed to generate");
    assert_eq!(summary.order.classes, vec!["XType"]);
    assert!(!output.join("include/_XType.hpp").exists());
    assert!(!output.join("include/xtypes.hpp").exists());
    let binding = read(output.join("pybind/pyXType.cpp"));
    assert!(binding.contains("py::class_< xtypes::XType, std::shared_ptr< xtypes::XType > >"));
    let module = read(output.join("pybind/pybind11_module.cpp"));
    assert!(module.contains("PYBIND11_INIT_XTYPES_GENERATOR__XTYPE(m);"));
    assert!(!module.contains("ProjectRegistry"));
}

#[test]
fn test_parse_error_names_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "broken.yaml", "properties: {}\n");
    let config = GeneratorConfig::new("robot").output_dir(dir.path().join("out"));

    let err = Generator::new(&config)
        .generate_file(&dir.path().join("broken.yaml"))
        .unwrap_err();
    match err {
        CodegenError::Parse { path, .. } => assert!(path.ends_with("broken.yaml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_python_only_emits_binding_artifacts() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    write_schema(dir.path(), "a.yaml", "name: A\n");
    let config = GeneratorConfig::new("robot")
        .output_dir(dir.path().join("out"))
        .languages([Language::Python]);

    let summary = generate_from_path(&config, dir.path()).expect("Failed to generate");
    let kinds: Vec<_> = summary.artifacts.entries.iter().map(|(_, kind, _)| *kind).collect();
    assert_eq!(
        kinds,
        vec![ArtifactKind::Binding, ArtifactKind::Stub, ArtifactKind::BindingModule]
    );
}
