use std::env;
use std::process::Command;

// CPU features we want to detect
#[derive(PartialEq, Eq, Debug)]
struct CpuFeature {
    name: &'static str,
    rustc_flag: &'static str,
    cfg_flag: &'static str,
    detected: bool,
}

impl CpuFeature {
    // Groups all supported CPU features that select a register width in this
    // crate, best tier first. Tiers are cumulative: the 256-bit cast routines
    // decompose into 128-bit operations, so `avx2` always compiles the `sse`
    // module as well.
    fn features() -> Vec<CpuFeature> {
        vec![
            CpuFeature {
                name: "avx2",
                rustc_flag: "+avx2,+avx,+sse4.1",
                cfg_flag: "avx2",
                detected: false,
            },
            CpuFeature {
                name: "sse4_1",
                rustc_flag: "+sse4.1",
                cfg_flag: "sse",
                detected: false,
            },
        ]
    }
}

// Feature detection trait to make implementations more modular
trait CpuFeatureDetector {
    fn detect_features(&self, features: &mut [CpuFeature]);
    fn is_applicable(&self) -> bool;
}

// Linux CPU feature detector
struct LinuxDetector;
impl CpuFeatureDetector for LinuxDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        if let Ok(cpuinfo) = std::fs::read_to_string("/proc/cpuinfo") {
            let contents = cpuinfo.to_lowercase();
            for feature in features.iter_mut() {
                feature.detected = contents.contains(feature.name);
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "linux")
    }
}

// macOS CPU feature detector
struct MacOSDetector;
impl CpuFeatureDetector for MacOSDetector {
    fn detect_features(&self, features: &mut [CpuFeature]) {
        let output = Command::new("sysctl").args(["-a"]).output();

        if let Ok(output) = output {
            let contents = String::from_utf8_lossy(&output.stdout).to_lowercase();

            for feature in features.iter_mut() {
                match feature.name {
                    "avx2" => feature.detected = contents.contains("hw.optional.avx2_0: 1"),
                    "sse4_1" => feature.detected = contents.contains("hw.optional.sse4_1: 1"),
                    _ => {}
                }
            }
        }
    }

    fn is_applicable(&self) -> bool {
        cfg!(target_os = "macos")
    }
}

// Factory that creates the appropriate detector for the current OS
struct PlatformDetector;
impl PlatformDetector {
    fn cpu_features_detectors() -> Vec<Box<dyn CpuFeatureDetector>> {
        vec![Box::new(LinuxDetector), Box::new(MacOSDetector)]
    }

    fn detect_cpu_features(features: &mut [CpuFeature]) {
        // Get detectors for all supported platforms
        let detectors = Self::cpu_features_detectors();

        // Find the applicable detector and use it
        for detector in detectors {
            if detector.is_applicable() {
                detector.detect_features(features);
                break;
            }
        }
    }

    fn apply(features: &mut [CpuFeature]) {
        // Find the best detected tier and emit its cfg flag together with the
        // flags of every tier below it.
        let best = features.iter().position(|cpu_feature| cpu_feature.detected);

        match best {
            Some(index) => {
                println!("cargo:rustc-flag=-C");
                println!(
                    "cargo:rustc-flag=target-feature={}",
                    features[index].rustc_flag
                );
                for feature in &features[index..] {
                    println!("cargo:rustc-cfg={}", feature.cfg_flag);
                }
            }
            None => {
                // No SIMD register width available: only the one-lane scalar
                // representation compiles.
                println!("cargo:rustc-cfg=fallback");
            }
        }

        println!("cargo::rustc-check-cfg=cfg(avx2)");
        println!("cargo::rustc-check-cfg=cfg(sse)");
        println!("cargo::rustc-check-cfg=cfg(fallback)");
    }
}

fn main() {
    let mut features = CpuFeature::features();

    // Determine if we're cross-compiling
    let host = env::var("HOST").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();

    let is_native_build = host == target;
    let is_x86 = target.starts_with("x86_64") || target.starts_with("i686");

    // Only run CPU detection for native x86 builds
    if is_native_build && is_x86 {
        PlatformDetector::detect_cpu_features(&mut features);
    }

    // Pass RUSTFLAGS for enabling target features
    PlatformDetector::apply(&mut features);
}
