use std::fs;
use std::process::Command;

/// Runs the report binary against a hand-written dataset and checks the
/// exact report bytes.
#[test]
fn test_report_binary_end_to_end() {
    let bin_path = env!("CARGO_BIN_EXE_sales-report");
    let data_dir = tempfile::tempdir().expect("failed to create temp dir");
    let out_dir = tempfile::tempdir().expect("failed to create temp dir");

    fs::write(
        data_dir.path().join("productos.txt"),
        "P001;Widget;100.0\nP002;Gadget;250.5\n",
    )
    .expect("failed to write catalog");
    fs::write(
        data_dir.path().join("vendedores.txt"),
        "CC;111;Ana;Lopez\nNIT;222;Juan;Garcia\n",
    )
    .expect("failed to write roster");
    fs::write(
        data_dir.path().join("ana_111.txt"),
        "CC;111\nP001;3;\nP002;2;\n",
    )
    .expect("failed to write sales file");
    fs::write(data_dir.path().join("juan_222.txt"), "NIT;222\nP001;1;\n")
        .expect("failed to write sales file");

    let agent_report = out_dir.path().join("agents.csv");
    let product_report = out_dir.path().join("products.csv");

    let output = Command::new(bin_path)
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--agent-report")
        .arg(&agent_report)
        .arg("--product-report")
        .arg(&product_report)
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "binary failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Ana: 3 × 100.0 + 2 × 250.5 = 801, Juan: 1 × 100.0
    let agents = fs::read_to_string(&agent_report).expect("agent report missing");
    assert_eq!(
        agents,
        "Nombre;TotalVentas\nAna Lopez;801.00\nJuan Garcia;100.00\n"
    );

    let products = fs::read_to_string(&product_report).expect("product report missing");
    assert_eq!(
        products,
        "Nombre;Precio;CantidadVendida\nWidget;100.0;4\nGadget;250.5;2\n"
    );
}

/// A missing catalog aborts the run with a failure status.
#[test]
fn test_missing_catalog_fails() {
    let bin_path = env!("CARGO_BIN_EXE_sales-report");
    let data_dir = tempfile::tempdir().expect("failed to create temp dir");

    let output = Command::new(bin_path)
        .arg("--data-dir")
        .arg(data_dir.path())
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
}

/// Generates a seeded dataset with one binary and reports on it with the
/// other.
#[test]
fn test_generate_then_report_pipeline() {
    let generate_bin = env!("CARGO_BIN_EXE_generate-data");
    let report_bin = env!("CARGO_BIN_EXE_sales-report");
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let data_dir = dir.path().join("archivos");

    let status = Command::new(generate_bin)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--products")
        .arg("12")
        .arg("--agents")
        .arg("4")
        .arg("--seed")
        .arg("7")
        .status()
        .expect("failed to execute generator");
    assert!(status.success());

    let agent_report = dir.path().join("agents.csv");
    let product_report = dir.path().join("products.csv");

    let status = Command::new(report_bin)
        .arg("--data-dir")
        .arg(&data_dir)
        .arg("--agent-report")
        .arg(&agent_report)
        .arg("--product-report")
        .arg(&product_report)
        .status()
        .expect("failed to execute binary");
    assert!(status.success());

    let agents = fs::read_to_string(&agent_report).expect("agent report missing");
    assert_eq!(agents.lines().next(), Some("Nombre;TotalVentas"));
    assert_eq!(agents.lines().count(), 5);

    let products = fs::read_to_string(&product_report).expect("product report missing");
    assert_eq!(products.lines().next(), Some("Nombre;Precio;CantidadVendida"));
    assert_eq!(products.lines().count(), 13);

    // the ranking never increases down the report
    let totals: Vec<f64> = agents
        .lines()
        .skip(1)
        .map(|line| line.rsplit(';').next().unwrap().parse().unwrap())
        .collect();
    assert!(totals.windows(2).all(|pair| pair[0] >= pair[1]));
}
