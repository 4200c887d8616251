use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use colored::*;
use dskylink::config::{DEFAULT_HOST, DEFAULT_PORT};
use dskylink::nouns::NounEntry;
use dskylink::{Gateway, GatewayConfig, NounCode, NounContext, NounReadout, NounRegistry, OnboardState};
use std::time::Duration;
use tracing::Level;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "error:".bright_red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let default_port = DEFAULT_PORT.to_string();
    let matches = App::new("dskylink")
        .version("0.1.0")
        .author("Space Systems Engineering Team")
        .about("DSKY telemetry/command bridge to a flight simulator datalink")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("host")
                .short("H")
                .long("host")
                .value_name("HOST")
                .help("Simulator host address")
                .takes_value(true)
                .default_value(DEFAULT_HOST)
                .global(true),
        )
        .arg(
            Arg::with_name("port")
                .short("p")
                .long("port")
                .value_name("PORT")
                .help("Simulator datalink port")
                .takes_value(true)
                .default_value(&default_port)
                .global(true),
        )
        .arg(
            Arg::with_name("timeout")
                .short("t")
                .long("timeout")
                .value_name("MS")
                .help("Request timeout in milliseconds")
                .takes_value(true)
                .global(true)
                .validator(|v| match v.parse::<u64>() {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Timeout must be a number of milliseconds".into()),
                }),
        )
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("FILE")
                .help("JSON gateway configuration (overrides host and port)")
                .takes_value(true)
                .global(true),
        )
        .arg(
            Arg::with_name("format")
                .short("f")
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .takes_value(true)
                .possible_values(&["json", "table"])
                .default_value("table")
                .global(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Enable debug logging")
                .global(true),
        )
        .subcommand(SubCommand::with_name("ping").about("Check that the simulator datalink answers"))
        .subcommand(SubCommand::with_name("list").about("List discovered telemetry values and commands"))
        .subcommand(
            SubCommand::with_name("get")
                .about("Read one telemetry value")
                .arg(Arg::with_name("name").help("Telemetry name").required(true))
                .arg(
                    Arg::with_name("body")
                        .short("b")
                        .long("body")
                        .value_name("INDEX")
                        .help("Celestial body index")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("noun")
                .about("Show a noun display")
                .arg(
                    Arg::with_name("code")
                        .help("Two-character noun code, e.g. 36")
                        .required(true)
                        .validator(|v| NounCode::new(&v).map(|_| ()).map_err(|e| e.to_string())),
                )
                .arg(
                    Arg::with_name("data")
                        .long("data")
                        .value_name("VALUE")
                        .help("Enter data into the noun before displaying it")
                        .takes_value(true)
                        .multiple(true),
                ),
        )
        .subcommand(SubCommand::with_name("nouns").about("List registered nouns"))
        .subcommand(
            SubCommand::with_name("throttle")
                .about("Set throttle")
                .arg(
                    Arg::with_name("percent")
                        .help("Throttle percentage (0-100)")
                        .required(true)
                        .validator(|v| match v.parse::<f64>() {
                            Ok(p) if (0.0..=100.0).contains(&p) => Ok(()),
                            _ => Err("Throttle must be between 0 and 100".into()),
                        }),
                ),
        )
        .subcommand(SubCommand::with_name("cut-throttle").about("Cut throttle to zero"))
        .subcommand(
            SubCommand::with_name("autopilot")
                .about("Set autopilot attitude mode")
                .arg(Arg::with_name("direction").help("Autopilot command name, e.g. prograde").required(true)),
        )
        .subcommand(SubCommand::with_name("autopilot-off").about("Disable the autopilot"))
        .subcommand(
            SubCommand::with_name("node")
                .about("Add or update a maneuver node")
                .arg(
                    Arg::with_name("action")
                        .required(true)
                        .possible_values(&["add", "update"]),
                )
                .arg(Arg::with_name("ut").help("Universal time of the node").required(true))
                .arg(Arg::with_name("x").help("Radial Δv (m/s)").required(true).allow_hyphen_values(true))
                .arg(Arg::with_name("y").help("Normal Δv (m/s)").required(true).allow_hyphen_values(true))
                .arg(Arg::with_name("z").help("Prograde Δv (m/s)").required(true).allow_hyphen_values(true)),
        )
        .get_matches();

    let level = if matches.is_present("verbose") { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = load_config(&matches)?;
    let format = matches.value_of("format").unwrap_or("table");
    let gateway = Gateway::new(&config)?;

    match matches.subcommand() {
        ("ping", _) => handle_ping(&gateway, &config, format),
        ("list", _) => handle_list(&gateway, format)?,
        ("get", Some(sub)) => handle_get(&gateway, sub, format)?,
        ("noun", Some(sub)) => handle_noun(&gateway, sub, format)?,
        ("nouns", _) => handle_nouns(format)?,
        ("throttle", Some(sub)) => {
            let percent: f64 = sub.value_of("percent").unwrap_or("0").parse()?;
            gateway.set_throttle(percent)?;
            print_done("Throttle", &format!("{}%", percent));
        }
        ("cut-throttle", _) => {
            gateway.cut_throttle()?;
            print_done("Throttle", "CUT");
        }
        ("autopilot", Some(sub)) => {
            let direction = sub.value_of("direction").unwrap_or_default();
            gateway.set_autopilot_mode(direction)?;
            print_done("Autopilot", direction);
        }
        ("autopilot-off", _) => {
            gateway.disable_autopilot()?;
            print_done("Autopilot", "OFF");
        }
        ("node", Some(sub)) => handle_node(&gateway, sub)?,
        _ => println!("{}", "No command specified. Use --help for usage information.".yellow()),
    }

    Ok(())
}

fn load_config(matches: &ArgMatches<'_>) -> Result<GatewayConfig, Box<dyn std::error::Error>> {
    let mut config = match matches.value_of("config") {
        Some(path) => GatewayConfig::from_file(path)?,
        None => {
            let host = matches.value_of("host").unwrap_or(DEFAULT_HOST);
            let port = match matches.value_of("port") {
                Some(port) => port.parse::<u16>()?,
                None => DEFAULT_PORT,
            };
            GatewayConfig::for_host(host, port)
        }
    };

    if let Some(timeout) = matches.value_of("timeout") {
        config = config.with_timeout(Duration::from_millis(timeout.parse()?));
    }
    Ok(config)
}

fn handle_ping(gateway: &Gateway, config: &GatewayConfig, format: &str) {
    let connected = gateway.check_connection();
    match format {
        "json" => println!("{}", serde_json::json!({ "connected": connected, "url": config.base_url })),
        _ if connected => println!("{} {}", "✅".green(), "Simulator datalink is responsive".bright_green()),
        _ => println!("{} {} {}", "❌".red(), "No answer from".bright_red(), config.base_url),
    }
}

fn handle_list(gateway: &Gateway, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let maps = gateway.discover()?;
    let telemetry = maps.sorted_telemetry();
    let commands = maps.sorted_commands();

    if format == "json" {
        println!("{}", serde_json::json!({ "telemetry": telemetry, "commands": commands }));
        return Ok(());
    }

    println!("{}", "Telemetry available:".bright_blue().bold());
    for name in &telemetry {
        println!("- {}", name);
    }
    println!();
    println!("{}", "Commands available:".bright_blue().bold());
    for name in &commands {
        println!("- {}", name);
    }
    Ok(())
}

fn handle_get(gateway: &Gateway, matches: &ArgMatches<'_>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let name = matches.value_of("name").unwrap_or_default();
    let body = matches.value_of("body").map(str::parse::<usize>).transpose()?;
    let value = gateway.get_telemetry(name, body)?;

    match format {
        "json" => println!("{}", serde_json::json!({ name: value })),
        _ => println!("{} {}", format!("{}:", name).bright_white(), value),
    }
    Ok(())
}

fn handle_noun(gateway: &Gateway, matches: &ArgMatches<'_>, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let code: NounCode = matches.value_of("code").unwrap_or_default().parse()?;
    let mut registry = NounRegistry::new();
    let mut computer = OnboardState::new();
    let entry = registry.resolve(code).into_entry();
    let mut ctx = NounContext::new(gateway, &mut computer);

    if let Some(values) = matches.values_of("data") {
        entry.receive_data(&mut ctx, values.map(str::to_string).collect())?;
    }

    let readout = entry.return_data(&mut ctx)?;
    print_readout(&entry, &readout, format);
    Ok(())
}

fn handle_nouns(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let registry = NounRegistry::new();
    if format == "json" {
        let nouns: Vec<_> = registry
            .entries()
            .iter()
            .map(|e| serde_json::json!({ "code": e.code(), "description": e.description() }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&nouns)?);
        return Ok(());
    }

    for entry in registry.entries() {
        println!("{}  {}", entry.code().to_string().bright_cyan(), entry.description());
    }
    Ok(())
}

fn handle_node(gateway: &Gateway, matches: &ArgMatches<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let number = |name: &str| -> Result<f64, std::num::ParseFloatError> {
        matches.value_of(name).unwrap_or("0").parse::<f64>()
    };
    let ut = number("ut")?;
    let delta_v = [number("x")?, number("y")?, number("z")?];

    match matches.value_of("action") {
        Some("update") => {
            gateway.update_maneuver_node(ut, delta_v)?;
            print_done("Maneuver node", "UPDATED");
        }
        _ => {
            gateway.add_maneuver_node(ut, delta_v)?;
            print_done("Maneuver node", "ADDED");
        }
    }
    Ok(())
}

fn print_readout(entry: &NounEntry, readout: &NounReadout, format: &str) {
    if format == "json" {
        let body = match readout {
            NounReadout::Display(payload) => serde_json::json!(payload),
            NounReadout::Alarm { .. } => serde_json::json!(false),
        };
        println!("{}", serde_json::json!({ "noun": entry.code(), "description": entry.description(), "data": body }));
        return;
    }

    println!("{} {}  {}", "NOUN".bright_blue().bold(), entry.code().to_string().bright_cyan(), entry.description());
    match readout {
        NounReadout::Display(payload) => {
            for (register, tooltip) in payload.registers().iter().zip(payload.tooltips.iter()) {
                println!("  {:>8}  {}", register.bright_green(), tooltip.unwrap_or("").dimmed());
            }
            if payload.is_octal {
                println!("  {}", "(octal)".dimmed());
            }
        }
        NounReadout::Alarm { code } => {
            println!("  {} {}", "PROG ALARM".bright_red().bold(), code);
        }
    }
}

fn print_done(what: &str, value: &str) {
    println!("{} {} {}", "✅".green(), format!("{}:", what).bright_white(), value.bright_green());
}
