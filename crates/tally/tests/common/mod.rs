// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.


#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use tally::{DataContext, SourcesConfig};
use tempfile::TempDir;

pub const DIRECTORY_CSV: &str = "\
Store Name,latitude,longitude,City
Pike Place,10.0,20.0,Seattle
Union Square,,22.0,San Francisco
Shibuya,14.0,,Tokyo
";

pub const MENU_CSV: &str = "\
Item,Calories,Fat (g)
Cool Lime Refresher,50,0
Shaken Iced Tea,-,0
Caffe Latte,150,5
Brewed Coffee,0,0
Mocha,100,2
";

pub const PORTFOLIO_CSV: &str = "\
reward,difficulty,duration,cluster
10,10,7,0
5,20,10,1
2,10,7,0
3,7,7,2
0,0,4,1
";

pub fn write_csv(dir: &TempDir, file: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(file);
    std::fs::write(&path, contents).unwrap();
    path
}

/// A data dir holding the three standard fixtures.
pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let config = SourcesConfig::default();
    write_csv(&dir, &config.directory_file, DIRECTORY_CSV);
    write_csv(&dir, &config.menu_file, MENU_CSV);
    write_csv(&dir, &config.portfolio_file, PORTFOLIO_CSV);
    dir
}

pub fn fixture_config(dir: &TempDir) -> SourcesConfig {
    SourcesConfig::default().with_data_dir(dir.path())
}

pub fn fixture_context() -> Arc<DataContext> {
    let dir = fixture_dir();
    DataContext::load(&fixture_config(&dir)).unwrap()
}
