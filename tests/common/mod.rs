#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};

pub fn dayone_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("dayone-import").unwrap();
    cmd.env("DAYONE_IMPORT_HOME", home);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run `init` so `home` holds a config with a `default` journal
pub fn init_home(home: &Path) {
    dayone_cmd(home).arg("init").assert().success();
}

/// Write a Day One export named `name` into `dir`
pub fn write_export(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub const WORK_EXPORT: &str = r#"{
  "metadata": {"version": "1.0"},
  "entries": [
    {
      "uuid": "U1",
      "creationDate": "2023-06-01T12:00:00Z",
      "timeZone": "America\/New_York",
      "tags": ["Hiking", "New York"],
      "starred": true,
      "text": "Up the hill\\. ![](dayone-moment://P1)",
      "location": {"placeName": "Bear Mountain", "localityName": "Stony Point",
                   "country": "United States", "latitude": 41.3126, "longitude": -74.0068},
      "weather": {"conditionsDescription": "Sunny", "temperatureCelsius": 24.0, "windSpeedKPH": 8.3},
      "creationDevice": "Pocket", "creationDeviceType": "iPhone",
      "photos": [{"identifier": "P1", "md5": "abc123", "type": "jpeg"}]
    },
    {
      "uuid": "U2",
      "creationDate": "2023-06-02T09:30:00Z",
      "text": "Sore legs after [the hike](dayone2://view?Id=U1)"
    }
  ]
}"#;
