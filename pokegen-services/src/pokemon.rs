//! Service that maintains the user's current list of Pokemon.

use pokegen_channel::{Channel, Teardown, operators};
use pokegen_model::PokemonRecord;
use std::sync::Arc;

use crate::database::Database;
use crate::service::Service;

/// The aggregate service wiring Reader → Caption → Description →
/// persistence → refreshed list.
///
/// `pokemon` always holds the list sorted by timestamp descending; a failed
/// refresh leaves the previously published list untouched. The store is the
/// single source of truth — every mutation ends in a refresh rather than a
/// local patch of the list.
pub struct Pokemon {
    /// True while any of reading, captioning, or describing is in flight.
    /// Deduplicated.
    pub is_generating: Channel<bool>,
    /// True while a refresh is in flight.
    pub is_refreshing: Channel<bool>,
    /// The current list, newest first.
    pub pokemon: Channel<Vec<PokemonRecord>>,
    delete_input: Channel<String>,
    put_input: Channel<PokemonRecord>,
    favourite_input: Channel<String>,
    refresh_input: Channel<()>,
    destroyed: Teardown,
}

impl Pokemon {
    #[must_use]
    pub fn new(
        reader: &crate::Reader,
        caption: &crate::Caption,
        description: &crate::Description,
        database: Arc<Database>,
    ) -> Self {
        let destroyed = Teardown::new();
        let is_refreshing = Channel::latest(false);
        let pokemon: Channel<Vec<PokemonRecord>> = Channel::latest(Vec::new());

        let delete_input: Channel<String> = Channel::event();
        let put_input: Channel<PokemonRecord> = Channel::event();
        let favourite_input: Channel<String> = Channel::event();
        let refresh_input: Channel<()> = Channel::event();

        // Combine the loading states from all relevant sources.
        let busy = operators::combine_latest3(
            &caption.is_generating_caption,
            &description.is_generating_description,
            &reader.is_reading,
            &destroyed,
        );
        let any_busy = operators::map(&busy, &destroyed, |(captioning, describing, reading)| {
            captioning || describing || reading
        });
        let is_generating = operators::distinct_until_changed(&any_busy, &destroyed, Some(false));

        // Whenever a new description is available, pair it with the image
        // it came from and store the record.
        let paired =
            operators::with_latest_from(&description.descriptions, &reader.object_urls, &destroyed);
        let records = operators::map(&paired, &destroyed, |(description, img_url)| {
            PokemonRecord::from_description(description, img_url)
        });
        operators::forward_into(&records, &put_input, &destroyed);

        // On put, update the store with the given record, then refresh.
        let db = Arc::clone(&database);
        let put_done = operators::map_to_latest_async(
            "pokemon: store record",
            &put_input,
            None,
            &destroyed,
            move |record: PokemonRecord| {
                let db = Arc::clone(&db);
                async move {
                    db.put(&record).await?;
                    Ok(())
                }
            },
        );
        Self::refresh_after(&put_done, &refresh_input, &destroyed);

        // On delete, remove the Pokemon, then refresh.
        let db = Arc::clone(&database);
        let delete_done = operators::map_to_latest_async(
            "pokemon: delete record",
            &delete_input,
            None,
            &destroyed,
            move |name: String| {
                let db = Arc::clone(&db);
                async move {
                    db.delete(&name).await?;
                    Ok(())
                }
            },
        );
        Self::refresh_after(&delete_done, &refresh_input, &destroyed);

        // On favourite, flip the persisted flag, then refresh.
        let db = Arc::clone(&database);
        let favourite_done = operators::map_to_latest_async(
            "pokemon: favourite record",
            &favourite_input,
            None,
            &destroyed,
            move |name: String| {
                let db = Arc::clone(&db);
                async move {
                    let Some(mut record) = db.find_one(&name).await? else {
                        anyhow::bail!("no record named '{name}'");
                    };
                    record.favourite = !record.favourite;
                    db.put(&record).await?;
                    Ok(())
                }
            },
        );
        Self::refresh_after(&favourite_done, &refresh_input, &destroyed);

        // On refresh, load the list and sort it newest first. A failure
        // emits nothing, leaving the current list in place.
        let db = Arc::clone(&database);
        let refreshed = operators::map_to_latest_async(
            "pokemon: refresh",
            &refresh_input,
            Some(&is_refreshing),
            &destroyed,
            move |()| {
                let db = Arc::clone(&db);
                async move {
                    let mut records = db.find_all().await?;
                    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
                    Ok(records)
                }
            },
        );
        operators::forward_into(&refreshed, &pokemon, &destroyed);

        let service = Self {
            is_generating,
            is_refreshing,
            pokemon,
            delete_input,
            put_input,
            favourite_input,
            refresh_input,
            destroyed,
        };

        // Populate the list on startup.
        service.refresh();
        service
    }

    fn refresh_after(done: &Channel<()>, refresh_input: &Channel<()>, destroyed: &Teardown) {
        let refresh = refresh_input.clone();
        operators::for_each(done, destroyed, move |()| refresh.emit(()));
    }

    /// Deletes the Pokemon with the given name.
    pub fn delete(&self, name: impl Into<String>) {
        self.delete_input.emit(name.into());
    }

    /// Toggles the favourite flag of the Pokemon with the given name.
    pub fn favourite(&self, name: impl Into<String>) {
        self.favourite_input.emit(name.into());
    }

    /// Stores the given Pokemon.
    pub fn put(&self, record: PokemonRecord) {
        self.put_input.emit(record);
    }

    /// Triggers a refresh of the list.
    pub fn refresh(&self) {
        self.refresh_input.emit(());
    }
}

impl Service for Pokemon {
    fn destroyed(&self) -> &Teardown {
        &self.destroyed
    }
}
