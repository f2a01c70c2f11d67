use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use n3v_engine::input::KeyBindings;

pub const USAGE: &str = "\
usage: n3v-viewer [MESH] [options]

  MESH                  .n3v mesh file to open (a demo cube is shown otherwise)

options:
  --step <f32>          translation per key press in world units (default 0.5)
  --log <filter>        env_logger filter, e.g. \"debug\" or \"n3v_engine=trace\"
  --write-cube <PATH>   write the demo cube as a .n3v file and exit
  -h, --help            print this help

keys:
  arrows                move the mesh along X / Y
  PageUp / PageDown     move the mesh along Z
  C                     clear the mesh
  R                     reload the mesh file
  Esc                   quit

Drop a .n3v file on the window to open it.
";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerArgs {
    pub mesh: Option<PathBuf>,
    pub step: f32,
    pub log_filter: Option<String>,
    pub write_cube: Option<PathBuf>,
    pub help: bool,
}

impl Default for ViewerArgs {
    fn default() -> Self {
        Self {
            mesh: None,
            step: KeyBindings::DEFAULT_STEP,
            log_filter: None,
            write_cube: None,
            help: false,
        }
    }
}

impl ViewerArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => out.help = true,
                "--step" => {
                    let raw = value_for(&mut args, "--step")?;
                    let step: f32 = raw
                        .parse()
                        .with_context(|| format!("invalid --step value \"{raw}\""))?;
                    if !step.is_finite() || step <= 0.0 {
                        bail!("--step must be a positive number, got {raw}");
                    }
                    out.step = step;
                }
                "--log" => out.log_filter = Some(value_for(&mut args, "--log")?),
                "--write-cube" => out.write_cube = Some(value_for(&mut args, "--write-cube")?.into()),
                flag if flag.starts_with('-') => bail!("unknown option {flag}\n\n{USAGE}"),
                path => {
                    if out.mesh.is_some() {
                        bail!("only one mesh file can be opened, got extra \"{path}\"");
                    }
                    out.mesh = Some(PathBuf::from(path));
                }
            }
        }

        Ok(out)
    }
}

fn value_for(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ViewerArgs> {
        ViewerArgs::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn no_arguments_gives_defaults() {
        let args = parse(&[]).unwrap();
        assert_eq!(args, ViewerArgs::default());
        assert_eq!(args.step, 0.5);
    }

    #[test]
    fn mesh_and_options() {
        let args = parse(&["teapot.n3v", "--step", "0.25", "--log", "debug"]).unwrap();
        assert_eq!(args.mesh, Some(PathBuf::from("teapot.n3v")));
        assert_eq!(args.step, 0.25);
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
        assert!(!args.help);
    }

    #[test]
    fn write_cube_and_help() {
        let args = parse(&["--write-cube", "out/cube.n3v", "-h"]).unwrap();
        assert_eq!(args.write_cube, Some(PathBuf::from("out/cube.n3v")));
        assert!(args.help);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse(&["--step"]).is_err());
        assert!(parse(&["--step", "fast"]).is_err());
        assert!(parse(&["--step", "-1"]).is_err());
        assert!(parse(&["--step", "0"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["a.n3v", "b.n3v"]).is_err());
    }
}
