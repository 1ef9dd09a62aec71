use bevy::asset::{AssetLoader, LoadContext, io::Reader};
use std::future::Future;
use thiserror::Error;

use super::schema::{CatalogError, ItemList};

#[derive(Default)]
pub struct TomlItemLoader;

#[derive(Debug, Error)]
pub enum TomlItemLoaderError {
    #[error("Could not load asset: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Could not interpret bytes as UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("Inconsistent item table: {0}")]
    Catalog(#[from] CatalogError),
}

impl AssetLoader for TomlItemLoader {
    type Asset = ItemList;
    type Settings = ();
    type Error = TomlItemLoaderError;

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _load_context: &mut LoadContext,
    ) -> impl Future<Output = Result<Self::Asset, Self::Error>> + Send {
        async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;

            let s = std::str::from_utf8(&bytes)?;
            let list: ItemList = toml::from_str(s)?;
            list.validate()?;

            Ok(list)
        }
    }

    fn extensions(&self) -> &[&str] {
        &["toml"]
    }
}
