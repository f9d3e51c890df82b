//! Well-known category identifiers and product-type filters.

/// Category identifiers active on the platform.
///
/// Gaps in the numbering belong to retired categories.
pub mod category_id {
	#![allow(missing_docs)]

	pub const MAGIC: u32 = 1;
	pub const YUGIOH: u32 = 2;
	pub const POKEMON: u32 = 3;
	pub const AXIS_ALLIES: u32 = 4;
	pub const DD_MINIATURES: u32 = 6;
	pub const EPIC: u32 = 7;
	pub const HEROCLIX: u32 = 8;
	pub const MONSTERPOCALYPSE: u32 = 9;
	pub const REDAKAI: u32 = 10;
	pub const STAR_WARS_MINIATURES: u32 = 11;
	pub const WORLD_OF_WARCRAFT_MINIATURES: u32 = 12;
	pub const WOW: u32 = 13;
	pub const SUPPLIES: u32 = 14;
	pub const ORGANIZERS_STORES: u32 = 15;
	pub const CHRONO_CLASH_SYSTEM: u32 = 16;
	pub const FORCE_OF_WILL: u32 = 17;
	pub const DICE_MASTERS: u32 = 18;
	pub const FUTURE_CARD_BUDDYFIGHT: u32 = 19;
	pub const WEISS_SCHWARZ: u32 = 20;
	pub const TCGPLAYER: u32 = 22;
	pub const DRAGON_BALL_Z: u32 = 23;
	pub const FINAL_FANTASY: u32 = 24;
	pub const UNIVERSUS: u32 = 25;
	pub const STAR_WARS_DESTINY: u32 = 26;
	pub const DRAGON_BALL_SUPER: u32 = 27;
	pub const DRAGOBORNE: u32 = 28;
	pub const FUNKO: u32 = 29;
	pub const METAX: u32 = 30;
	pub const CARD_SLEEVES: u32 = 31;
	pub const DECK_BOXES: u32 = 32;
	pub const CARD_STORAGE_TINS: u32 = 33;
	pub const LIFE_COUNTERS: u32 = 34;
	pub const PLAYMATS: u32 = 35;
	pub const ZOMBIE_WORLD_ORDER: u32 = 36;
	pub const THE_CASTER_CHRONICLES: u32 = 37;
	pub const MY_LITTLE_PONY: u32 = 38;
	pub const WARHAMMER_BOOKS: u32 = 39;
	pub const WARHAMMER_BIG_BOX_GAMES: u32 = 40;
	pub const WARHAMMER_BOX_SETS: u32 = 41;
	pub const WARHAMMER_CLAMPACKS: u32 = 42;
	pub const CITADEL_PAINTS: u32 = 43;
	pub const CITADEL_TOOLS: u32 = 44;
	pub const WARHAMMER_GAME_ACCESSORIES: u32 = 45;
	pub const BOOKS: u32 = 46;
	pub const EXODUS: u32 = 47;
	pub const LIGHTSEEKERS: u32 = 48;
	pub const PROTECTIVE_PAGES: u32 = 49;
	pub const STORAGE_ALBUMS: u32 = 50;
	pub const COLLECTIBLE_STORAGE: u32 = 51;
	pub const SUPPLY_BUNDLES: u32 = 52;
	pub const MUNCHKIN: u32 = 53;
	pub const WARHAMMER_AGE_OF_SIGMAR_CHAMPIONS: u32 = 54;
	pub const ARCHITECT: u32 = 55;
	pub const BULK_LOTS: u32 = 56;
	pub const TRANSFORMERS: u32 = 57;
	pub const BAKUGAN: u32 = 58;
	pub const KEYFORGE: u32 = 59;
	pub const CARDFIGHT_VANGUARD: u32 = 60;
	pub const ARGENT_SAGA: u32 = 61;
	pub const FLESH_AND_BLOOD: u32 = 62;
	pub const DIGIMON: u32 = 63;
	pub const ALTERNATE_SOULS: u32 = 64;
	pub const GATE_RULER: u32 = 65;
	pub const METAZOO: u32 = 66;
	pub const WIXOSS: u32 = 67;
	pub const ONE_PIECE: u32 = 68;
	pub const MARVEL_COMICS: u32 = 69;
	pub const DC_COMICS: u32 = 70;
	pub const LORCANA: u32 = 71;
	pub const BATTLE_SPIRITS_SAGA: u32 = 72;
	pub const SHADOWVERSE_EVOLVE: u32 = 73;
	pub const GRAND_ARCHIVE: u32 = 74;
	pub const AKORA: u32 = 75;
	pub const KRYPTIK: u32 = 76;
	pub const SORCERY_CONTESTED_REALM: u32 = 77;
	pub const ALPHA_CLASH: u32 = 78;
	pub const STAR_WARS_UNLIMITED: u32 = 79;
	pub const DRAGON_BALL_SUPER_FUSION_WORLD: u32 = 80;
	pub const UNION_ARENA: u32 = 81;
	pub const TCGPLAYER_SUPPLIES: u32 = 82;
}

/// Every product type the catalog distinguishes.
pub const ALL_PRODUCT_TYPES: &[&str] = &[
	"Cards",
	"Booster Box",
	"Booster Pack",
	"Sealed Products",
	"Intro Pack",
	"Fat Pack",
	"Box Sets",
	"Precon/Event Decks",
	"Magic Deck Pack",
	"Magic Booster Box Case",
	"All 5 Intro Packs",
	"Intro Pack Display",
	"3x Magic Booster Packs",
	"Booster Battle Pack",
];

/// Product types that contain singles.
pub const PRODUCT_TYPES_SINGLES: &[&str] = ALL_PRODUCT_TYPES.split_at(1).0;

/// Product types that contain sealed products.
pub const PRODUCT_TYPES_SEALED: &[&str] = ALL_PRODUCT_TYPES.split_at(1).1;

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn singles_and_sealed_partition_all_types() {
		assert_eq!(PRODUCT_TYPES_SINGLES, &["Cards"]);
		assert_eq!(PRODUCT_TYPES_SINGLES.len() + PRODUCT_TYPES_SEALED.len(), ALL_PRODUCT_TYPES.len());
		assert!(!PRODUCT_TYPES_SEALED.contains(&"Cards"));
	}

	#[test]
	fn skipped_identifiers_stay_skipped() {
		assert_eq!(category_id::MAGIC, 1);
		assert_eq!(category_id::DD_MINIATURES, category_id::AXIS_ALLIES + 2);
		assert_eq!(category_id::TCGPLAYER, category_id::WEISS_SCHWARZ + 2);
	}
}
