//! Exports d'une grille terminée : texte, ANSI, HTML, JSON.
//!
//! Producteurs de chaînes purs ; l'écriture sur disque revient à l'appelant.

pub mod html;
pub mod json;
pub mod markup;
pub mod text;
