use std::collections::HashSet;

use medal_gallery::{
    config::Config,
    context::Context,
    gallery::GalleryFilter,
    profile::username_from_query,
    views,
};
use shared::Rarity;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

const USAGE: &str = "Usage: gallery <command>
  medals [search] [--rarity=N,R,SR,SSR,UR] [--hide-obtained] [--sort=rarity]
  toggle <medal id>
  ranking
  profile <username | ?user=...>
  clear";

#[derive(Debug)]
enum Command {
    Medals(GalleryFilter),
    Toggle(String),
    Ranking,
    Profile(String),
    Clear,
}

impl Command {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let (name, rest) = args
            .split_first()
            .ok_or_else(|| anyhow::anyhow!("Missing command\n{USAGE}"))?;
        match name.as_str() {
            "medals" => Ok(Command::Medals(parse_filter(rest)?)),
            "toggle" => match rest {
                [id] => Ok(Command::Toggle(id.trim().to_string())),
                _ => anyhow::bail!("toggle expects one medal id\n{USAGE}"),
            },
            "ranking" => Ok(Command::Ranking),
            "profile" => {
                let arg = rest.first().map(String::as_str).unwrap_or_default();
                let username = if arg.contains('=') {
                    username_from_query(arg)
                } else {
                    Some(arg.to_string()).filter(|name| !name.is_empty())
                };
                username
                    .map(Command::Profile)
                    .ok_or_else(|| anyhow::anyhow!("profile expects a username\n{USAGE}"))
            }
            "clear" => Ok(Command::Clear),
            other => anyhow::bail!("Unknown command: {other}\n{USAGE}"),
        }
    }
}

fn parse_filter(args: &[String]) -> anyhow::Result<GalleryFilter> {
    let mut filter = GalleryFilter::default();
    let mut search = vec![];
    for arg in args {
        if let Some(value) = arg.strip_prefix("--rarity=") {
            filter.rarities = value
                .split(',')
                .filter(|code| !code.trim().is_empty())
                .map(|code| {
                    Rarity::from_code(code).ok_or_else(|| anyhow::anyhow!("Unknown rarity: {code}"))
                })
                .collect::<anyhow::Result<HashSet<_>>>()?;
        } else if let Some(value) = arg.strip_prefix("--sort=") {
            filter.sort = value.parse()?;
        } else if arg == "--hide-obtained" {
            filter.hide_obtained = true;
        } else {
            search.push(arg.as_str());
        }
    }
    filter.search = search.join(" ");
    Ok(filter)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));
    tracing::subscriber::set_global_default(subscriber)?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    debug!("Running {:?}", command);

    let config = Config::from_env()?;
    let mut context = Context::load(&config).await?;

    match command {
        Command::Medals(filter) => {
            let medals = context.list_filtered(&filter);
            for medal in &medals {
                println!("{}", views::medal_line(medal, context.is_obtained(&medal.id)));
            }
            info!("Showing {} of {} medals", medals.len(), context.catalog.len());
        }
        Command::Toggle(id) => {
            if context.catalog.find_by_id(&id).is_none() {
                warn!("Medal {id} is not in the catalog");
            }
            let obtained = context.toggle(&id)?;
            println!(
                "{id}: {}",
                if obtained { "obtained" } else { "not obtained" }
            );
        }
        Command::Ranking => {
            println!("{}", views::ranking(&context.compute_ranking()));
        }
        Command::Profile(username) => match context.profile(&username) {
            Some(profile) => println!("{}", views::profile(&profile)),
            None => println!("User {username} not found"),
        },
        Command::Clear => {
            context.ownership.clear()?;
            println!("Cleared obtained medals");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use medal_gallery::gallery::SortOrder;

    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn parse_medals_filter() {
        let command = Command::parse(&args(&[
            "medals",
            "night",
            "owl",
            "--rarity=UR,SSR",
            "--hide-obtained",
            "--sort=rarity",
        ]))
        .unwrap();
        let Command::Medals(filter) = command else {
            panic!("expected medals command");
        };
        assert_eq!(filter.search, "night owl");
        assert_eq!(filter.rarities.len(), 2);
        assert!(filter.rarities.contains(&Rarity::SSR));
        assert!(filter.hide_obtained);
        assert_eq!(filter.sort, SortOrder::RarityDesc);
    }

    #[test]
    fn parse_profile_from_query() {
        let command = Command::parse(&args(&["profile", "?user=Al%20ice"])).unwrap();
        assert!(matches!(command, Command::Profile(name) if name == "Al ice"));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Command::parse(&args(&[])).is_err());
        assert!(Command::parse(&args(&["toggle"])).is_err());
        assert!(Command::parse(&args(&["profile"])).is_err());
        assert!(Command::parse(&args(&["medals", "--rarity=XR"])).is_err());
        assert!(Command::parse(&args(&["fly"])).is_err());
    }
}
