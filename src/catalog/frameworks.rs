//! Built-in .NET Framework descriptors.
//!
//! Source: "How to determine which .NET Framework versions are installed"
//! (docs.microsoft.com). Releases that ship different `Release` values per
//! OS update level get one descriptor per value.

use super::VersionDescriptor;

const V4_FULL: &str = r"SOFTWARE\Microsoft\NET Framework Setup\NDP\v4\Full";

const fn release(label: &'static str, value: u64) -> VersionDescriptor {
    VersionDescriptor {
        label,
        probe_path: V4_FULL,
        probe_key: "Release",
        expected_value: value,
    }
}

/// Every known release, oldest first.
pub const FRAMEWORKS: &[VersionDescriptor] = &[
    VersionDescriptor {
        label: ".NET Framework 1.0",
        probe_path: r"Software\Microsoft\.NETFramework\Policy\v1.0\3705",
        probe_key: "Install",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 1.1",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v1.1.4322",
        probe_key: "Install",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 2.0",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v2.0.50727",
        probe_key: "Install",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 3.0",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v3.0\Setup",
        probe_key: "InstallSuccess",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 3.5",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v3.5",
        probe_key: "Install",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 4.0 Client Profile",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v4\Client",
        probe_key: "Install",
        expected_value: 1,
    },
    VersionDescriptor {
        label: ".NET Framework 4.0 Full Profile",
        probe_path: r"Software\Microsoft\NET Framework Setup\NDP\v4\Full",
        probe_key: "Install",
        expected_value: 1,
    },
    release(".NET Framework 4.5", 378389),
    // Windows 8.1 and Windows Server 2012 R2
    release(".NET Framework 4.5.1", 378675),
    // all other Windows versions
    release(".NET Framework 4.5.1", 378758),
    release(".NET Framework 4.5.2", 379893),
    // Windows 10
    release(".NET Framework 4.6", 393295),
    // all other Windows versions
    release(".NET Framework 4.6", 393297),
    // Windows 10 November Update
    release(".NET Framework 4.6.1", 394254),
    // all other Windows versions, Windows 10 included
    release(".NET Framework 4.6.1", 394271),
    // Windows 10 Anniversary Update and Windows Server 2016
    release(".NET Framework 4.6.2", 394802),
    // all other Windows versions, other Windows 10 releases included
    release(".NET Framework 4.6.2", 394806),
    // Windows 10 Creators Update
    release(".NET Framework 4.7", 460798),
    // all other Windows versions, other Windows 10 releases included
    release(".NET Framework 4.7", 460805),
    // Windows 10 Fall Creators Update and Windows Server, version 1709
    release(".NET Framework 4.7.1", 461308),
    // all other Windows versions, other Windows 10 releases included
    release(".NET Framework 4.7.1", 461310),
    // Windows 10 April 2018 Update and Windows Server, version 1803
    release(".NET Framework 4.7.1", 461808),
    // all Windows versions except Windows 10 April 2018 Update and
    // Windows Server, version 1803
    release(".NET Framework 4.7.1", 461814),
    // Windows 10 May 2019 and November 2019 Update
    release(".NET Framework 4.8", 528040),
    // Windows 10 May 2020 and October 2020 Update
    release(".NET Framework 4.8", 528372),
    // all other Windows versions, other Windows 10 releases included
    release(".NET Framework 4.8", 528049),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_known_descriptor() {
        assert_eq!(FRAMEWORKS.len(), 26);
    }

    #[test]
    fn table_starts_with_oldest_release() {
        assert_eq!(FRAMEWORKS[0].label, ".NET Framework 1.0");
        assert_eq!(FRAMEWORKS[FRAMEWORKS.len() - 1].label, ".NET Framework 4.8");
    }

    #[test]
    fn release_descriptors_share_v4_full_key() {
        for d in FRAMEWORKS.iter().filter(|d| d.probe_key == "Release") {
            assert_eq!(d.probe_path, V4_FULL);
            assert!(d.expected_value > 1);
        }
    }

    #[test]
    fn release_values_follow_vendor_table() {
        let values: Vec<(&str, u64)> = FRAMEWORKS
            .iter()
            .filter(|d| d.probe_key == "Release")
            .map(|d| (d.label.trim_start_matches(".NET Framework "), d.expected_value))
            .collect();
        assert_eq!(
            values,
            vec![
                ("4.5", 378389),
                ("4.5.1", 378675),
                ("4.5.1", 378758),
                ("4.5.2", 379893),
                ("4.6", 393295),
                ("4.6", 393297),
                ("4.6.1", 394254),
                ("4.6.1", 394271),
                ("4.6.2", 394802),
                ("4.6.2", 394806),
                ("4.7", 460798),
                ("4.7", 460805),
                ("4.7.1", 461308),
                ("4.7.1", 461310),
                ("4.7.1", 461808),
                ("4.7.1", 461814),
                ("4.8", 528040),
                ("4.8", 528372),
                ("4.8", 528049),
            ]
        );
    }

    #[test]
    fn install_markers_are_boolean() {
        for d in FRAMEWORKS.iter().filter(|d| d.probe_key != "Release") {
            assert_eq!(d.expected_value, 1, "{}", d.label);
            assert!(d.probe_path.starts_with(r"Software\Microsoft\"));
        }
    }

    #[test]
    fn v4_client_lives_under_ndp() {
        let client = FRAMEWORKS
            .iter()
            .find(|d| d.label == ".NET Framework 4.0 Client Profile")
            .unwrap();
        assert_eq!(
            client.probe_path,
            r"Software\Microsoft\NET Framework Setup\NDP\v4\Client"
        );
    }
}
