use semver::Version;
use std::env;

fn main() {
    // gdal-sys declares `links = "gdal"` and exports the version as `cargo:version_number`,
    // encoded like GDAL_VERSION_NUM (e.g. 3080100 for 3.8.1).
    let gdal_version_string = env::var("DEP_GDAL_VERSION_NUMBER")
        .expect("gdal-sys did not export DEP_GDAL_VERSION_NUMBER");
    let gdal_version: u64 = gdal_version_string
        .trim()
        .parse()
        .expect("Could not convert gdal version string into number.");

    let major = gdal_version / 1_000_000;
    let minor = (gdal_version - major * 1_000_000) / 10_000;
    let patch = (gdal_version - major * 1_000_000 - minor * 10_000) / 100;
    let detected_version = Version::new(major, minor, patch);

    println!("cargo:rerun-if-env-changed=DEP_GDAL_VERSION_NUMBER");

    if detected_version.major < 2 {
        panic!(
            "The GDAL crate requires a GDAL version >= 2.0.0. Found {}",
            detected_version
        );
    }

    println!("cargo:rustc-cfg=major_is_{}", detected_version.major);

    for major in 2..=detected_version.major {
        println!("cargo:rustc-cfg=major_ge_{major}");
    }

    for minor in 0..=detected_version.minor {
        println!("cargo:rustc-cfg=minor_ge_{minor}");
    }
}
