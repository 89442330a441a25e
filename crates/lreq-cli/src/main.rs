use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use lreq::{
    CharacterSlots, CombinatorLayout, Command, Cursor, LayoutFormat, MemorySlots, PlayerSession,
    RequestError, SlotAccessor, TemplateConfig, VehicleSlots, execute,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

const USAGE_EXIT_CODE: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    command: Option<Command>,
    slots_path: Option<PathBuf>,
    template_path: Option<PathBuf>,
    catalog_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    format: Option<LayoutFormat>,
    out_path: Option<PathBuf>,
    vehicle: bool,
    show_help: bool,
}

fn main() {
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let exit_code = run(std::env::args_os(), &mut stdout, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run<I, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let options = match parse_args(args) {
        Ok(options) => options,
        Err(message) => {
            let _ = writeln!(err, "error: {message}");
            let _ = write_usage(err);
            return USAGE_EXIT_CODE;
        }
    };

    if options.show_help {
        if write_usage(out).is_err() {
            return 1;
        }
        return 0;
    }

    let (Some(command), Some(slots_path)) = (options.command, options.slots_path.as_deref())
    else {
        let _ = writeln!(err, "error: a command and `--slots FILE` are required");
        let _ = write_usage(err);
        return USAGE_EXIT_CODE;
    };

    match run_command(command, slots_path, &options, out) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            if let Some(hint) = error.suggestion() {
                let _ = writeln!(err, "hint: {hint}");
            }
            error.exit_code()
        }
    }
}

fn parse_args<I>(args: I) -> Result<CliOptions, String>
where
    I: IntoIterator<Item = OsString>,
{
    let mut iter = args.into_iter();
    let _argv0 = iter.next();

    let mut options = CliOptions {
        command: None,
        slots_path: None,
        template_path: None,
        catalog_path: None,
        config_path: None,
        format: None,
        out_path: None,
        vehicle: false,
        show_help: false,
    };

    while let Some(argument) = iter.next() {
        let arg = argument.to_string_lossy();
        let arg_str = arg.as_ref();

        match arg_str {
            "-h" | "--help" => options.show_help = true,
            "--vehicle" => options.vehicle = true,
            "--slots" => set_once(
                &mut options.slots_path,
                next_path(&mut iter, "--slots")?,
                "--slots",
            )?,
            "--template" => set_once(
                &mut options.template_path,
                next_path(&mut iter, "--template")?,
                "--template",
            )?,
            "--catalog" => set_once(
                &mut options.catalog_path,
                next_path(&mut iter, "--catalog")?,
                "--catalog",
            )?,
            "--config" => set_once(
                &mut options.config_path,
                next_path(&mut iter, "--config")?,
                "--config",
            )?,
            "--out" => set_once(
                &mut options.out_path,
                next_path(&mut iter, "--out")?,
                "--out",
            )?,
            "--format" => {
                let value = iter
                    .next()
                    .ok_or_else(|| String::from("missing argument for `--format`"))?;
                let format = value.to_string_lossy().parse::<LayoutFormat>()?;
                set_once(&mut options.format, format, "--format")?;
            }
            _ => {
                if arg_str.starts_with('-') {
                    return Err(format!("unknown option `{arg_str}`"));
                }
                let command = arg_str.parse::<Command>()?;
                set_once(&mut options.command, command, "command")?;
            }
        }
    }

    Ok(options)
}

fn next_path<I>(iter: &mut I, flag: &str) -> Result<PathBuf, String>
where
    I: Iterator<Item = OsString>,
{
    iter.next()
        .map(PathBuf::from)
        .ok_or_else(|| format!("missing file argument for `{flag}`"))
}

fn set_once<T>(slot: &mut Option<T>, value: T, name: &str) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("`{name}` may only be provided once"));
    }
    *slot = Some(value);
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RequestError> {
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|error| RequestError::json(format!("{}: {error}", path.display())))
}

fn render_json<T: Serialize>(value: &T) -> Result<String, RequestError> {
    serde_json::to_string_pretty(value).map_err(|error| RequestError::json(error.to_string()))
}

fn emit<W: Write>(rendered: &str, out_path: Option<&Path>, out: &mut W) -> Result<(), RequestError> {
    match out_path {
        Some(path) => fs::write(path, format!("{rendered}\n"))?,
        None => writeln!(out, "{rendered}")?,
    }
    Ok(())
}

fn run_command<W: Write>(
    command: Command,
    slots_path: &Path,
    options: &CliOptions,
    out: &mut W,
) -> Result<(), RequestError> {
    let mut config: TemplateConfig = match options.config_path.as_deref() {
        Some(path) => read_json(path)?,
        None => TemplateConfig::default(),
    };
    if let Some(format) = options.format {
        config.format = format;
    }

    let table: MemorySlots = read_json(slots_path)?;
    let catalog: Vec<String> = match options.catalog_path.as_deref() {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };
    let mut cursor = match (command, options.template_path.as_deref()) {
        (Command::Export, _) => Cursor::Blueprint(None),
        (_, Some(path)) => Cursor::Blueprint(Some(read_json::<CombinatorLayout>(path)?)),
        (_, None) => Cursor::Empty,
    };

    let table = if options.vehicle {
        let mut entity = VehicleSlots::new(table);
        apply(command, &mut entity, &mut cursor, &catalog, &config)?;
        entity.into_inner()
    } else {
        let mut entity = CharacterSlots::new(table);
        apply(command, &mut entity, &mut cursor, &catalog, &config)?;
        entity.into_inner()
    };

    let rendered = match cursor {
        Cursor::Blueprint(Some(layout)) if command == Command::Export => render_json(&layout)?,
        _ => render_json(&table)?,
    };
    emit(&rendered, options.out_path.as_deref(), out)
}

fn apply(
    command: Command,
    entity: &mut dyn SlotAccessor,
    cursor: &mut Cursor,
    catalog: &[String],
    config: &TemplateConfig,
) -> Result<(), RequestError> {
    let mut session = PlayerSession::new(Some(entity), cursor);
    execute(command, &mut session, catalog, config).map(|_| ())
}

fn write_usage<W>(out: &mut W) -> io::Result<()>
where
    W: Write,
{
    writeln!(
        out,
        "Usage: lreq COMMAND --slots FILE [--template FILE] [--catalog FILE]\n\
         \x20           [--format canonical|packed] [--config FILE] [--vehicle] [--out FILE]\n\
         \n\
         Commands:\n\
         \x20 export            encode the slots into a blueprint layout\n\
         \x20 import            replace all requests with the template\n\
         \x20 append            add the template after the last used row\n\
         \x20 increment         add template bounds to matching requests\n\
         \x20 decrement         subtract template bounds from matching requests\n\
         \x20 set               overwrite matching requests with the template\n\
         \x20 auto_trash        request trashing of every unrequested catalog item\n\
         \x20 clear_auto_trash  remove the auto-trash region\n\
         \x20 clear_requests    remove every request\n\
         \n\
         Examples:\n\
         \n\
         lreq export --slots player.json --out template.json\n\
         lreq increment --slots player.json --template template.json\n\
         lreq auto_trash --slots car.json --catalog items.json --vehicle\n",
    )
}
