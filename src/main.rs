use clap::{CommandFactory, Parser};
use std::time::Instant;
use warmview::cli::{
    Cli, Commands, OutputFormat, render_template, resolve_flatten_config, resolve_plot_config,
};
use warmview::info::{
    get_netcdf_info, print_file_info_human, print_file_info_json, print_file_info_yaml,
};
use warmview::log::{
    flatten_config_echo, plot_config_echo, show_farewell_with_timing, show_greeting,
};
use warmview::{process_flatten_job, process_plot_job, validate_flatten_job};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli);
    run(cli)
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Flatten {
            input,
            output,
            dry_run,
        } => {
            let start_time = Instant::now();
            if !cli.quiet {
                show_greeting();
            }
            let config = resolve_flatten_config(cli.config.as_ref(), input, output)?;
            if !cli.quiet {
                flatten_config_echo(&config);
            }

            if dry_run {
                validate_flatten_job(&config)?;
            } else {
                process_flatten_job(&config)?;
            }

            if !cli.quiet {
                show_farewell_with_timing(start_time.elapsed());
            }
            Ok(())
        }

        Commands::Plot {
            table,
            sample,
            output,
            width,
            height,
        } => {
            let config =
                resolve_plot_config(cli.config.as_ref(), table, sample, output, width, height)?;
            if !cli.quiet {
                plot_config_echo(&config);
            }
            process_plot_job(&config)
        }

        Commands::Info {
            file,
            detailed,
            variable,
            format,
        } => {
            let info = get_netcdf_info(&file, variable.as_deref(), detailed)?;
            match format {
                OutputFormat::Human => print_file_info_human(&info),
                OutputFormat::Json => print_file_info_json(&info)?,
                OutputFormat::Yaml => print_file_info_yaml(&info)?,
            }
            Ok(())
        }

        Commands::Template {
            template_type,
            output,
            format,
        } => {
            let rendered = render_template(&template_type, &format)?;
            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{}", rendered),
            }
            Ok(())
        }

        Commands::Completions { shell, output } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            match output {
                Some(path) => {
                    let mut file = std::fs::File::create(path)?;
                    clap_complete::generate(shell, &mut cmd, name, &mut file);
                }
                None => clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout()),
            }
            Ok(())
        }
    }
}
