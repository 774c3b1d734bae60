use crate::preview::document::{CreditLine, PreviewDocument, PreviewSection, TimelineEntry};

/// Renders the preview as a Markdown document, one `##` block per section.
pub fn render_markdown(doc: &PreviewDocument) -> String {
    let mut md = format!("# {}\n", doc.header.full_name.trim());
    if let Some(headline) = &doc.header.headline {
        md.push_str(&format!("_{headline}_\n"));
    }
    md.push('\n');

    md.push_str("## Personal details\n\n");
    let p = &doc.personal;
    for (label, value) in [
        ("Name", p.name.trim()),
        ("Email", p.email.as_str()),
        ("Phone", p.phone.as_str()),
        ("Address", p.address_line.as_str()),
    ] {
        if !value.is_empty() {
            md.push_str(&format!("- **{label}:** {value}\n"));
        }
    }
    for extra in &p.extras {
        md.push_str(&format!("- **{}:** {}\n", extra.label, extra.value));
    }
    if let Some(photo) = &p.photo {
        md.push_str(&format!("\n![Photo]({})\n", photo.url));
    }
    md.push('\n');

    for section in &doc.sections {
        md.push_str(&format!("## {}\n\n", section.heading()));
        match section {
            PreviewSection::Profile { text } | PreviewSection::Signature { text } => {
                md.push_str(text);
                md.push('\n');
            }
            PreviewSection::Employment { entries } | PreviewSection::Education { entries } => {
                for entry in entries {
                    push_timeline(&mut md, entry);
                }
            }
            PreviewSection::Skills { skills } => {
                for skill in skills {
                    md.push_str(&format!("- {} ({})\n", skill.name, skill.level));
                }
            }
            PreviewSection::Languages { chips } | PreviewSection::Hobbies { chips } => {
                md.push_str(&chips.join(", "));
                md.push('\n');
            }
            PreviewSection::Courses { items } | PreviewSection::Certificates { items } => {
                for item in items {
                    push_credit(&mut md, item);
                }
            }
            PreviewSection::References { references } => {
                for r in references {
                    md.push_str(&format!("### {}\n", r.name));
                    let role = [r.position.as_str(), r.company.as_str()]
                        .into_iter()
                        .filter(|s| !s.is_empty())
                        .collect::<Vec<_>>()
                        .join(", ");
                    if !role.is_empty() {
                        md.push_str(&format!("{role}\n"));
                    }
                    for contact in [&r.email, &r.phone] {
                        if !contact.is_empty() {
                            md.push_str(&format!("- {contact}\n"));
                        }
                    }
                    md.push('\n');
                }
            }
        }
        md.push('\n');
    }
    md
}

fn push_timeline(md: &mut String, entry: &TimelineEntry) {
    md.push_str(&format!("### {}\n", entry.title));
    match &entry.location {
        Some(location) => md.push_str(&format!("{}, {}\n", entry.organization, location)),
        None => md.push_str(&format!("{}\n", entry.organization)),
    }
    md.push_str(&format!("_{}_\n", entry.dates));
    if let Some(description) = &entry.description {
        md.push('\n');
        md.push_str(description);
        md.push('\n');
    }
    md.push('\n');
}

fn push_credit(md: &mut String, item: &CreditLine) {
    let mut line = format!("- **{}**", item.name);
    if !item.issuer.is_empty() {
        line.push_str(&format!(", {}", item.issuer));
    }
    if !item.date.is_empty() {
        line.push_str(&format!(" ({})", item.date));
    }
    md.push_str(&line);
    md.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::fields::{EntryCollection, EntryField, PersonalField};
    use crate::builder::Builder;
    use crate::models::resume::OptionalPersonalField;
    use crate::models::template::resolve_template;
    use crate::preview::render_preview;

    fn ada() -> Builder {
        let mut b = Builder::new(resolve_template("classic"));
        b.set_personal_field(PersonalField::FirstName, "Ada");
        b.set_personal_field(PersonalField::LastName, "Lovelace");
        b.set_personal_field(PersonalField::Email, "ada@example.com");
        b
    }

    #[test]
    fn test_header_and_personal_block() {
        let mut b = ada();
        b.set_personal_field(PersonalField::DesiredPosition, "Analyst");
        b.set_use_as_headline(true);
        b.set_optional_personal_value(OptionalPersonalField::Nationality, "British");
        b.toggle_optional_personal_field(OptionalPersonalField::Nationality);

        let md = render_markdown(&render_preview(&b));
        assert!(md.starts_with("# Ada Lovelace\n_Analyst_\n"));
        assert!(md.contains("- **Email:** ada@example.com\n"));
        assert!(md.contains("- **Nationality:** British\n"));
        assert!(!md.contains("**Phone:**"));
    }

    #[test]
    fn test_sections_render_in_document_order() {
        let mut b = ada();
        b.add_entry(EntryCollection::Experience);
        b.update_entry_field(EntryCollection::Experience, 0, EntryField::JobTitle, "Analyst");
        b.update_entry_field(EntryCollection::Experience, 0, EntryField::Company, "Babbage & Co");
        b.update_entry_field(EntryCollection::Experience, 0, EntryField::StartDate, "1842");
        b.set_current_flag(EntryCollection::Experience, 0, true);
        b.add_entry(EntryCollection::Skills);
        b.update_entry_field(EntryCollection::Skills, 0, EntryField::Name, "Mathematics");
        b.update_entry_field(EntryCollection::Skills, 0, EntryField::Level, "Expert");

        let md = render_markdown(&render_preview(&b));
        let employment = md.find("## Employment").unwrap();
        let skills = md.find("## Skills").unwrap();
        assert!(employment < skills);
        assert!(md.contains("### Analyst\nBabbage & Co\n_1842 - Present_\n"));
        assert!(md.contains("- Mathematics (Expert)\n"));
        assert!(!md.contains("## Education"));
    }

    #[test]
    fn test_chips_join_non_blank_values() {
        let mut b = ada();
        for value in ["English", " ", "French"] {
            let i = b.add_entry(EntryCollection::Languages);
            b.update_entry_field(EntryCollection::Languages, i, EntryField::Text, value);
        }
        let md = render_markdown(&render_preview(&b));
        assert!(md.contains("## Languages\n\nEnglish, French\n"));
    }
}
