//! Console front end: drives a viewer session from stdin commands.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::time::Duration;

use molview::engine::ViewContent;
use molview::input::{InputEvent, MouseButton};
use molview::options::Options;
use molview::scene::PickTarget;
use molview::service::http::HttpService;
use molview::{Viewer, ViewerCommand};

/// How long a console command waits for the service to settle.
const SETTLE: Duration = Duration::from_secs(15);

type ConsoleViewer = Viewer<HttpService>;

/// Replay a press/move/release gesture from `(0, 0)` to `(dx, dy)`.
fn gesture(viewer: &mut ConsoleViewer, dx: f32, dy: f32, target: PickTarget) {
    let events = [
        InputEvent::CursorMoved { x: 0.0, y: 0.0 },
        InputEvent::MouseButton { button: MouseButton::Left, pressed: true },
        InputEvent::CursorMoved { x: dx, y: dy },
        InputEvent::MouseButton { button: MouseButton::Left, pressed: false },
    ];
    for event in events {
        viewer.handle_event(event, target);
    }
}

/// Atom numbers are shown 1-based.
fn parse_atom(arg: Option<&str>) -> Option<PickTarget> {
    let number: u32 = arg?.parse().ok()?;
    number.checked_sub(1).map(PickTarget::Atom)
}

fn report(out: &mut impl Write, viewer: &ConsoleViewer) -> io::Result<()> {
    let engine = viewer.engine();
    let (x, y, z) = engine.rotation().rounded();
    let molecule = engine.molecule().unwrap_or("-");
    writeln!(out, "{molecule} @ ({x}, {y}, {z})")?;
    match engine.content() {
        ViewContent::Placeholder => writeln!(out, "  select a molecule")?,
        ViewContent::Failed(msg) => writeln!(out, "  render failed: {msg}")?,
        ViewContent::Graph(graph) => writeln!(
            out,
            "  {} atoms, {} bonds, {} bytes of svg",
            graph.atoms().len(),
            graph.bonds().len(),
            graph.svg().len()
        )?,
    }
    writeln!(out, "  {}", engine.selection().status())
}

fn report_stats(out: &mut impl Write, viewer: &ConsoleViewer) -> io::Result<()> {
    let fields = viewer.engine().stats().fields();
    writeln!(out, "  formula:    {}", fields.formula)?;
    writeln!(out, "  molar mass: {}", fields.molar_mass)?;
    writeln!(out, "  atoms:      {}", fields.atom_count)?;
    writeln!(out, "  bonds:      {}", fields.bond_count)?;
    writeln!(out, "  elements:   {}", fields.element_counts)?;
    writeln!(out, "  orders:     {}", fields.bond_orders)
}

/// Run one console line. Returns `false` on `quit`.
fn run_line(out: &mut impl Write, viewer: &mut ConsoleViewer, line: &str) -> io::Result<bool> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(true);
    };
    match cmd {
        "quit" | "exit" => return Ok(false),
        "select" => {
            let name = words.collect::<Vec<_>>().join(" ");
            viewer.execute(ViewerCommand::SelectMolecule(name));
        }
        "clear" => viewer.execute(ViewerCommand::ClearMolecule),
        "reset" => viewer.handle_key_press("KeyR"),
        "background" => gesture(viewer, 0.0, 0.0, PickTarget::None),
        "drag" => {
            let mut delta = words.map(str::parse::<f32>);
            match (delta.next(), delta.next()) {
                (Some(Ok(dx)), Some(Ok(dy))) => gesture(viewer, dx, dy, PickTarget::None),
                _ => writeln!(out, "usage: drag <dx> <dy>")?,
            }
        }
        "click" | "hover" => {
            let Some(target) = parse_atom(words.next()) else {
                writeln!(out, "usage: {cmd} <atom number>")?;
                return Ok(true);
            };
            if cmd == "click" {
                gesture(viewer, 0.0, 0.0, target);
            } else {
                viewer.handle_event(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, target);
                let text = viewer.engine().bindings().tooltip().map(|t| t.text.clone());
                writeln!(out, "  {}", text.as_deref().unwrap_or("(nothing)"))?;
                return Ok(true);
            }
        }
        "molecules" => match viewer.list_molecules() {
            Ok(names) => writeln!(out, "  {}", names.join(", "))?,
            Err(e) => log::error!("{e}"),
        },
        "elements" => match viewer.list_elements() {
            Ok(rows) => {
                for row in rows {
                    writeln!(
                        out,
                        "  {:>3} {:<3} {} r={}",
                        row.number, row.code, row.name, row.radius
                    )?;
                }
            }
            Err(e) => log::error!("{e}"),
        },
        "stats" => {
            let _ = viewer.wait_idle(SETTLE);
            return report_stats(out, viewer).map(|()| true);
        }
        _ => {
            writeln!(
                out,
                "commands: select <name>, clear, drag <dx> <dy>, click <n>, hover <n>, \
                 background, reset, molecules, elements, stats, quit"
            )?;
            return Ok(true);
        }
    }
    if !viewer.wait_idle(SETTLE) {
        log::warn!("service still busy");
    }
    report(out, viewer)?;
    Ok(true)
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(molecule) = args.next() else {
        log::error!("Usage: molview <molecule> [options.toml]");
        std::process::exit(1);
    };

    let options = match args.next() {
        Some(path) => match Options::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{e}");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let service = HttpService::new(&options.service);
    let mut viewer = Viewer::builder()
        .with_options(options)
        .with_molecule(molecule)
        .build(service);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = viewer.wait_idle(SETTLE);
    if let Err(e) = report(&mut out, &viewer) {
        log::error!("{e}");
        return;
    }

    for line in io::stdin().lock().lines() {
        let keep_going = line.and_then(|line| run_line(&mut out, &mut viewer, &line));
        match keep_going {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                log::error!("{e}");
                break;
            }
        }
    }
}
