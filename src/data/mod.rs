pub mod loader;
pub mod schema;

use crate::core::states::AppState;
use bevy::prelude::*;
use schema::{ItemCatalog, ItemList};

pub const ITEM_TABLE_PATH: &str = "data/items.toml";

// --------------------------- resources ---------------------------
#[derive(Resource, Default)]
pub struct ItemAssets {
    handle: Option<Handle<ItemList>>,
}

// --------------------------- plugin ---------------------------
pub struct DataPlugin;
impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_asset::<ItemList>()
            .register_asset_loader(loader::TomlItemLoader)
            .init_resource::<ItemAssets>()
            .add_systems(OnEnter(AppState::Loading), start_loading)
            .add_systems(
                Update,
                check_loaded.run_if(in_state(AppState::Loading)),
            );
    }
}

// --------------------------- systems ---------------------------
fn start_loading(mut item_assets: ResMut<ItemAssets>, asset_server: Res<AssetServer>) {
    let handle: Handle<ItemList> = asset_server.load(ITEM_TABLE_PATH);
    item_assets.handle = Some(handle);
}

/// Publishes the catalog as a plain resource so gameplay systems never touch asset handles
fn check_loaded(
    mut commands: Commands,
    mut next: ResMut<NextState<AppState>>,
    item_assets: Res<ItemAssets>,
    lists: Res<Assets<ItemList>>,
) {
    if let Some(list) = item_assets.handle.as_ref().and_then(|h| lists.get(h)) {
        info!("Item catalog loaded: {} definitions", list.items.len());
        commands.insert_resource(ItemCatalog::from(list));
        next.set(AppState::InGame);
    }
}
