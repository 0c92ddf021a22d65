use torus_locator::config::RuntimeConfig;
use torus_locator::Detection;

fn main() {
    env_logger::init();

    // Demo stub: the reference deployment and one detection near the image centre
    let locator = match RuntimeConfig::default().build_locator() {
        Ok(l) => l,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    let det = Detection::from_box(270.0, 200.0, 370.0, 260.0);
    match locator.locate(&det) {
        Ok(loc) => println!(
            "range={:.3} orientation_deg={:.2} confidence={:.3} position=({:.3}, {:.3}, {:.3})",
            loc.estimate.distance,
            loc.estimate.orientation.to_degrees(),
            loc.estimate.confidence,
            loc.position.x,
            loc.position.y,
            loc.position.z
        ),
        Err(err) => println!("rejected: {err}"),
    }
}
