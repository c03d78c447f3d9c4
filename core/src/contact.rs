use crate::product::Product;
use crate::urlenc::encode_component;

pub fn whatsapp_message(product: &Product) -> String {
    format!(
        "Hola, me interesa {} (ref {}). ¿Está disponible?",
        product.name, product.id
    )
}

/// `https://wa.me/<digits>?text=<urlencoded>`. The phone keeps digits only,
/// so `+52 1 555...` and `521555...` produce the same link.
pub fn whatsapp_url(phone: &str, message: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}?text={}", encode_component(message))
}
