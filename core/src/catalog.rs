#[derive(Clone, Copy, Debug)]
pub struct CategoryEntry {
    pub key: &'static str,
    pub folder: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub filenames: &'static [&'static str],
    /// Pre-generated size/WebP variants exist next to the originals.
    pub responsive_variants: bool,
}

pub const DEFAULT_CATEGORY_KEY: &str = "ramos-elegantes";

pub const CATALOG: &[CategoryEntry] = &[
    CategoryEntry {
        key: "ramos-elegantes",
        folder: "ramos-elegantes",
        display_name: "Ramo Premium",
        description: "Ramo de temporada con flores seleccionadas a mano y envoltura elegante.",
        filenames: &[
            "Ramo1.png", "Ramo2.png", "Ramo3.png", "Ramo4.png", "Ramo5.png", "Ramo6.png",
            "Ramo7.png", "Ramo8.png",
        ],
        responsive_variants: true,
    },
    CategoryEntry {
        key: "arreglos-florales",
        folder: "arreglos-florales",
        display_name: "Arreglo Floral",
        description: "Arreglo en base de cerámica, ideal para mesas y recepciones.",
        filenames: &[
            "Arreglo1.png", "Arreglo2.png", "Arreglo3.png", "Arreglo4.png", "Arreglo5.png",
            "Arreglo6.png",
        ],
        responsive_variants: true,
    },
    CategoryEntry {
        key: "cajas-sorpresa",
        folder: "cajas-sorpresa",
        display_name: "Caja Sorpresa",
        description: "Caja con rosas preservadas, chocolates y tarjeta personalizada.",
        filenames: &["Caja1.png", "Caja2.png", "Caja3.png", "Caja4.png"],
        responsive_variants: false,
    },
    CategoryEntry {
        key: "plantas-interior",
        folder: "plantas-interior",
        display_name: "Planta de Interior",
        description: "Planta decorativa en maceta artesanal, lista para regalar.",
        filenames: &["Planta1.png", "Planta2.png", "Planta3.png", "Planta4.png", "Planta5.png"],
        responsive_variants: false,
    },
    CategoryEntry {
        key: "condolencias",
        folder: "condolencias",
        display_name: "Corona de Condolencias",
        description: "Corona sobria con flores blancas y cinta de dedicatoria.",
        filenames: &["Corona1.png", "Corona2.png", "Corona3.png"],
        responsive_variants: false,
    },
];

pub fn category_by_key(key: &str) -> Option<&'static CategoryEntry> {
    let trimmed = key.trim();
    CATALOG
        .iter()
        .find(|entry| entry.key.eq_ignore_ascii_case(trimmed))
}

pub fn category_by_folder(folder: &str) -> Option<&'static CategoryEntry> {
    CATALOG.iter().find(|entry| entry.folder == folder)
}
