//! Text console: read stdin → parse → drive the host the way a game server would

use bevy::app::AppExit;
use bevy::prelude::*;
use once_cell::sync::Lazy;
use std::collections::VecDeque;
use std::num::NonZero;
use std::sync::{Arc, Mutex};

use crate::character::components::{Player, identity_for};
use crate::character::events::{JoinRequest, RespawnRequest, TakeDamage};
use crate::config::LoadoutConfig;
use crate::core::permissions::Permissions;
use crate::core::{events::LogEvent, states::AppState};
use crate::data::schema::ItemCatalog;
use crate::inventory::events::{GiveItemEvent, ListInventoryEvent};
use crate::loadout::commands::LoadoutCommand;
use crate::loadout::record::SlotGroup;
use crate::loadout::systems::PendingLoadouts;

static CLI_BUFFER: Lazy<Arc<Mutex<VecDeque<String>>>> =
    Lazy::new(|| Arc::new(Mutex::new(VecDeque::new())));

const HELP: &str = "commands:
  help                                   this text
  status                                 app state and counts
  exit / quit                            stop the server
  items                                  list item definitions
  join <name>                            connect a player
  give <name> <kind> [amount] [group]    give an item (group: main|belt|wear)
  inv <name>                             show a player's containers
  kill <name>                            kill a player
  respawn <name>                         respawn a dead player
  grant <name> <permission>              grant a permission
  revoke <name> <permission>             revoke a permission
  loadout <name> <save|setdefault|reset> run the loadout command as <name>";

/// Plugin entry
pub struct DebugCliPlugin;
impl Plugin for DebugCliPlugin {
    fn build(&self, app: &mut App) {
        {
            let buffer = CLI_BUFFER.clone();
            std::thread::spawn(move || {
                use std::io::{self, BufRead};
                let stdin = io::stdin();
                for line in stdin.lock().lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match buffer.lock() {
                        Ok(mut buf) => buf.push_back(line.to_string()),
                        Err(_) => break,
                    }
                }
            });
        }
        app.add_event::<CliLine>()
            .add_systems(Update, read_stdin)
            .add_systems(
                Update,
                execute_cli_commands.run_if(in_state(AppState::InGame)),
            );
    }
}

/* ---------------------------- events and commands ---------------------------- */

/// One full line typed into the terminal
#[derive(Event)]
struct CliLine(String);

#[derive(Debug, PartialEq)]
enum Command {
    Help,
    Status,
    Exit,
    Items,
    Join(String),
    Give {
        name: String,
        kind: String,
        amount: i32,
        group: SlotGroup,
    },
    Inventory(String),
    Kill(String),
    Respawn(String),
    Grant { name: String, permission: String },
    Revoke { name: String, permission: String },
    Loadout { name: String, args: Vec<String> },
    Usage(&'static str),
    Unsupported(String),
}

/* ---------------------------- stdin ---------------------------- */

fn read_stdin(mut writer: EventWriter<CliLine>) {
    let Ok(mut buffer) = CLI_BUFFER.lock() else {
        return;
    };
    while let Some(line) = buffer.pop_front() {
        writer.write(CliLine(line));
    }
}

/* ---------------------------- execution ---------------------------- */

#[allow(clippy::too_many_arguments)]
fn execute_cli_commands(
    mut line_reader: EventReader<CliLine>,
    mut app_exit: EventWriter<AppExit>,
    mut log: EventWriter<LogEvent>,
    state: Res<State<AppState>>,
    catalog: Res<ItemCatalog>,
    config: Res<LoadoutConfig>,
    pending: Res<PendingLoadouts>,
    players: Query<(Entity, &Player)>,
    mut permissions: ResMut<Permissions>,
    mut ev_join: EventWriter<JoinRequest>,
    mut ev_give: EventWriter<GiveItemEvent>,
    mut ev_list: EventWriter<ListInventoryEvent>,
    mut ev_damage: EventWriter<TakeDamage>,
    mut ev_respawn: EventWriter<RespawnRequest>,
    mut ev_loadout: EventWriter<LoadoutCommand>,
) {
    let find = |name: &str| {
        players
            .iter()
            .find(|(_, p)| p.name.eq_ignore_ascii_case(name))
            .map(|(entity, _)| entity)
    };

    for CliLine(input) in line_reader.read() {
        let command = parse_command(input);

        // commands addressed to a connected player
        let target = match &command {
            Command::Give { name, .. }
            | Command::Inventory(name)
            | Command::Kill(name)
            | Command::Respawn(name)
            | Command::Loadout { name, .. } => match find(name) {
                Some(entity) => Some(entity),
                None => {
                    log.write(LogEvent(format!("No connected player named {name}")));
                    continue;
                }
            },
            _ => None,
        };

        match (command, target) {
            (Command::Help, _) => {
                log.write(LogEvent(HELP.into()));
            }

            (Command::Status, _) => {
                log.write(LogEvent(format!(
                    "State: {:?}, Items: {}, Players: {}, Pending loadouts: {}, Config: {} ({:?})",
                    state.get(),
                    catalog.len(),
                    players.iter().count(),
                    pending.len(),
                    config.path().display(),
                    config.source,
                )));
            }

            (Command::Exit, _) => {
                log.write(LogEvent("Bye~".into()));
                app_exit.write(AppExit::Error(NonZero::<u8>::MIN));
            }

            (Command::Items, _) => {
                for def in catalog.sorted() {
                    log.write(LogEvent(format!(
                        "{} | {} | {:?}",
                        def.shortname, def.name, def.category
                    )));
                }
            }

            (Command::Join(name), _) => {
                ev_join.write(JoinRequest { name });
            }

            (Command::Give { kind, amount, group, .. }, Some(player)) => {
                ev_give.write(GiveItemEvent {
                    player,
                    kind,
                    amount,
                    group,
                });
            }

            (Command::Inventory(_), Some(player)) => {
                ev_list.write(ListInventoryEvent { player });
            }

            (Command::Kill(_), Some(player)) => {
                ev_damage.write(TakeDamage {
                    player,
                    damage: i32::MAX,
                });
            }

            (Command::Respawn(_), Some(player)) => {
                ev_respawn.write(RespawnRequest { player });
            }

            (Command::Grant { name, permission }, _) => {
                let id = identity_for(&name).to_string();
                let text = if permissions.grant(&id, &permission) {
                    format!("Granted {permission} to {name}")
                } else {
                    format!("Unknown permission {permission}")
                };
                log.write(LogEvent(text));
            }

            (Command::Revoke { name, permission }, _) => {
                let id = identity_for(&name).to_string();
                let text = if permissions.revoke(&id, &permission) {
                    format!("Revoked {permission} from {name}")
                } else {
                    format!("{name} does not hold {permission}")
                };
                log.write(LogEvent(text));
            }

            (Command::Loadout { args, .. }, Some(player)) => {
                ev_loadout.write(LoadoutCommand { player, args });
            }

            (Command::Usage(usage), _) => {
                log.write(LogEvent(format!("usage: {usage}")));
            }

            (Command::Unsupported(cmd), _) => {
                log.write(LogEvent(format!("Unsupported command: {cmd}")));
            }

            // player commands always resolve a target above
            (_, None) => {}
        }
    }
}

/* ---------------------------- parsing ---------------------------- */

fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("").to_lowercase();

    match cmd.as_str() {
        "help" | "h" | "?" => Command::Help,
        "status" | "s" => Command::Status,
        "exit" | "quit" | "q" => Command::Exit,
        "items" | "item" | "i" => Command::Items,
        "join" => parts
            .next()
            .map_or(Command::Usage("join <name>"), |name| Command::Join(name.to_string())),
        "inventory" | "inv" => parts
            .next()
            .map_or(Command::Usage("inv <name>"), |name| Command::Inventory(name.to_string())),
        "kill" => parts
            .next()
            .map_or(Command::Usage("kill <name>"), |name| Command::Kill(name.to_string())),
        "respawn" => parts
            .next()
            .map_or(Command::Usage("respawn <name>"), |name| Command::Respawn(name.to_string())),
        "give" => {
            const USAGE: &str = "give <name> <kind> [amount] [main|belt|wear]";
            let (Some(name), Some(kind)) = (parts.next(), parts.next()) else {
                return Command::Usage(USAGE);
            };
            let amount = match parts.next().map(str::parse::<i32>) {
                None => 1,
                Some(Ok(amount)) => amount,
                Some(Err(_)) => return Command::Usage(USAGE),
            };
            let group = match parts.next().map(SlotGroup::parse) {
                None => SlotGroup::Main,
                Some(Some(group)) => group,
                Some(None) => return Command::Usage(USAGE),
            };
            Command::Give {
                name: name.to_string(),
                kind: kind.to_string(),
                amount,
                group,
            }
        }
        "grant" | "revoke" => {
            let (Some(name), Some(permission)) = (parts.next(), parts.next()) else {
                return Command::Usage("grant|revoke <name> <permission>");
            };
            let (name, permission) = (name.to_string(), permission.to_string());
            if cmd == "grant" {
                Command::Grant { name, permission }
            } else {
                Command::Revoke { name, permission }
            }
        }
        "loadout" => match parts.next() {
            Some(name) => Command::Loadout {
                name: name.to_string(),
                args: parts.map(str::to_string).collect(),
            },
            None => Command::Usage("loadout <name> <save|setdefault|reset>"),
        },
        other => Command::Unsupported(other.into()),
    }
}
