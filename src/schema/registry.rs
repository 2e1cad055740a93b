//! Compiled-in category schemas.

use super::{CategorySchema, FieldDefinition, SelectOption};

macro_rules! options {
    ($(($value:literal, $label:literal)),* $(,)?) => {
        &[$(SelectOption { value: $value, label: $label }),*]
    };
}

const YES_NO: &[SelectOption] = options![("yes", "Yes"), ("no", "No")];

/// Every category with its own post form, in lookup order.
pub static CATEGORY_SCHEMAS: &[CategorySchema] = &[
    CategorySchema {
        category_id: "property",
        display_name: "Properties",
        media_guidance: Some(
            "Upload clear photos of exterior, interior, kitchen, bathrooms, and any special features",
        ),
        fields: &[
            FieldDefinition::number("bedrooms", "Bedrooms")
                .required()
                .min(0.0)
                .max(20.0)
                .placeholder("e.g., 3"),
            FieldDefinition::number("bathrooms", "Bathrooms")
                .required()
                .min(0.0)
                .max(10.0)
                .step(0.5)
                .placeholder("e.g., 2"),
            FieldDefinition::number("sqft", "Square Feet")
                .required()
                .min(100.0)
                .placeholder("e.g., 1500"),
            FieldDefinition::select(
                "property_type",
                "Property Type",
                options![
                    ("apartment", "Apartment"),
                    ("villa", "Villa"),
                    ("house", "House"),
                    ("land", "Land"),
                    ("commercial", "Commercial"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "furnished",
                "Furnished",
                options![("yes", "Yes"), ("no", "No"), ("semi", "Semi-Furnished")],
            )
            .required(),
            FieldDefinition::select("parking", "Parking Available", YES_NO),
            FieldDefinition::number("year_built", "Year Built")
                .min(1900.0)
                .max(2026.0)
                .placeholder("e.g., 2020"),
            FieldDefinition::number("floor", "Floor Number").placeholder("e.g., 5"),
            FieldDefinition::number("total_floors", "Total Floors in Building")
                .placeholder("e.g., 10"),
            FieldDefinition::select("land_title", "Land Title Available", YES_NO),
            FieldDefinition::multi_select(
                "amenities",
                "Amenities",
                options![
                    ("pool", "Swimming Pool"),
                    ("gym", "Gym"),
                    ("security", "24/7 Security"),
                    ("garden", "Garden"),
                    ("balcony", "Balcony"),
                    ("elevator", "Elevator"),
                    ("ac", "Air Conditioning"),
                    ("heating", "Heating"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "motors",
        display_name: "Motors",
        media_guidance: Some(
            "Upload photos from all angles: front, back, sides, interior, engine, and any damage",
        ),
        fields: &[
            FieldDefinition::text("make", "Make")
                .required()
                .placeholder("e.g., Toyota"),
            FieldDefinition::text("model", "Model")
                .required()
                .placeholder("e.g., Camry"),
            FieldDefinition::number("year", "Year")
                .required()
                .min(1900.0)
                .max(2026.0)
                .placeholder("e.g., 2020"),
            FieldDefinition::number("mileage", "Mileage (km)")
                .required()
                .min(0.0)
                .placeholder("e.g., 50000"),
            FieldDefinition::select(
                "fuel_type",
                "Fuel Type",
                options![
                    ("petrol", "Petrol"),
                    ("diesel", "Diesel"),
                    ("electric", "Electric"),
                    ("hybrid", "Hybrid"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "transmission",
                "Transmission",
                options![("automatic", "Automatic"), ("manual", "Manual")],
            )
            .required(),
            FieldDefinition::select(
                "body_type",
                "Body Type",
                options![
                    ("sedan", "Sedan"),
                    ("suv", "SUV"),
                    ("truck", "Truck"),
                    ("coupe", "Coupe"),
                    ("hatchback", "Hatchback"),
                    ("van", "Van"),
                ],
            ),
            FieldDefinition::text("color", "Color").placeholder("e.g., White"),
            FieldDefinition::text("engine_size", "Engine Size").placeholder("e.g., 2.5L"),
            FieldDefinition::number("doors", "Number of Doors")
                .min(2.0)
                .max(5.0)
                .placeholder("e.g., 4"),
            FieldDefinition::number("seats", "Number of Seats")
                .min(2.0)
                .max(9.0)
                .placeholder("e.g., 5"),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("sunroof", "Sunroof"),
                    ("leather_seats", "Leather Seats"),
                    ("navigation", "Navigation System"),
                    ("backup_camera", "Backup Camera"),
                    ("bluetooth", "Bluetooth"),
                    ("cruise_control", "Cruise Control"),
                    ("parking_sensors", "Parking Sensors"),
                    ("alloy_wheels", "Alloy Wheels"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "jobs",
        display_name: "Jobs",
        media_guidance: Some("Upload company logo or workplace photos (optional)"),
        fields: &[
            FieldDefinition::text("company_name", "Company Name")
                .required()
                .placeholder("e.g., ABC Corporation"),
            FieldDefinition::select(
                "job_type",
                "Job Type",
                options![
                    ("full-time", "Full-time"),
                    ("part-time", "Part-time"),
                    ("contract", "Contract"),
                    ("freelance", "Freelance"),
                    ("internship", "Internship"),
                ],
            )
            .required(),
            FieldDefinition::text("experience", "Experience Required")
                .required()
                .placeholder("e.g., 2-5 years"),
            FieldDefinition::select(
                "education",
                "Education Required",
                options![
                    ("high_school", "High School"),
                    ("diploma", "Diploma"),
                    ("bachelor", "Bachelor's Degree"),
                    ("master", "Master's Degree"),
                    ("phd", "PhD"),
                ],
            ),
            FieldDefinition::select(
                "industry",
                "Industry",
                options![
                    ("technology", "Technology"),
                    ("finance", "Finance"),
                    ("healthcare", "Healthcare"),
                    ("education", "Education"),
                    ("retail", "Retail"),
                    ("manufacturing", "Manufacturing"),
                    ("hospitality", "Hospitality"),
                ],
            ),
            FieldDefinition::number("salary_min", "Minimum Salary")
                .min(0.0)
                .placeholder("e.g., 50000"),
            FieldDefinition::number("salary_max", "Maximum Salary")
                .min(0.0)
                .placeholder("e.g., 80000"),
            FieldDefinition::date("deadline", "Application Deadline"),
            FieldDefinition::line_list("requirements", "Requirements (one per line)")
                .placeholder(
                    "Bachelor's degree in Computer Science\n3+ years of Python experience\nStrong communication skills",
                )
                .helper("Enter each requirement on a new line"),
            FieldDefinition::line_list("responsibilities", "Responsibilities (one per line)")
                .placeholder("Develop and maintain software applications\nLead team meetings\nCode review")
                .helper("Enter each responsibility on a new line"),
            FieldDefinition::line_list("benefits", "Benefits (one per line)")
                .placeholder("Health insurance\nPaid vacation\nRemote work options")
                .helper("Enter each benefit on a new line"),
        ],
    },
    CategorySchema {
        category_id: "electronics",
        display_name: "Electronics",
        media_guidance: Some(
            "Upload clear photos showing the device from multiple angles, screen, and any accessories",
        ),
        fields: &[
            FieldDefinition::text("brand", "Brand")
                .required()
                .placeholder("e.g., Apple"),
            FieldDefinition::text("model", "Model")
                .required()
                .placeholder("e.g., iPhone 14"),
            FieldDefinition::text("storage", "Storage").placeholder("e.g., 256GB"),
            FieldDefinition::text("ram", "RAM").placeholder("e.g., 8GB"),
            FieldDefinition::text("processor", "Processor").placeholder("e.g., A15 Bionic"),
            FieldDefinition::text("screen_size", "Screen Size").placeholder("e.g., 6.1 inch"),
            FieldDefinition::text("battery", "Battery").placeholder("e.g., 3279mAh"),
            FieldDefinition::text("camera", "Camera").placeholder("e.g., 12MP"),
            FieldDefinition::text("color", "Color").placeholder("e.g., Black"),
            FieldDefinition::select(
                "warranty",
                "Warranty",
                options![
                    ("no", "No Warranty"),
                    ("yes", "Under Warranty"),
                    ("1year", "1 Year"),
                    ("2year", "2 Years"),
                ],
            ),
            FieldDefinition::multi_select(
                "accessories",
                "Accessories Included",
                options![
                    ("charger", "Charger"),
                    ("case", "Case"),
                    ("earphones", "Earphones"),
                    ("box", "Original Box"),
                    ("cable", "Cable"),
                    ("adapter", "Adapter"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("5g", "5G"),
                    ("face_id", "Face ID"),
                    ("fingerprint", "Fingerprint Scanner"),
                    ("wireless_charging", "Wireless Charging"),
                    ("water_resistant", "Water Resistant"),
                    ("dual_sim", "Dual SIM"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "fashion",
        display_name: "Fashion & Beauty",
        media_guidance: Some(
            "Upload clear photos showing the item from different angles, tags, and any defects",
        ),
        fields: &[
            FieldDefinition::text("brand", "Brand").placeholder("e.g., Nike"),
            FieldDefinition::text("size", "Size")
                .required()
                .placeholder("e.g., M, L, 38, 40"),
            FieldDefinition::select(
                "gender",
                "Gender",
                options![
                    ("men", "Men"),
                    ("women", "Women"),
                    ("unisex", "Unisex"),
                    ("kids", "Kids"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "category_type",
                "Category",
                options![
                    ("clothing", "Clothing"),
                    ("shoes", "Shoes"),
                    ("bags", "Bags"),
                    ("accessories", "Accessories"),
                    ("beauty", "Beauty Products"),
                ],
            ),
            FieldDefinition::text("material", "Material")
                .placeholder("e.g., Cotton, Leather, Polyester"),
            FieldDefinition::text("color", "Color").placeholder("e.g., Blue"),
            FieldDefinition::select(
                "season",
                "Season",
                options![
                    ("summer", "Summer"),
                    ("winter", "Winter"),
                    ("all-season", "All Season"),
                ],
            ),
            FieldDefinition::select(
                "style",
                "Style",
                options![
                    ("casual", "Casual"),
                    ("formal", "Formal"),
                    ("sport", "Sport"),
                    ("vintage", "Vintage"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("waterproof", "Waterproof"),
                    ("breathable", "Breathable"),
                    ("stretchable", "Stretchable"),
                    ("designer", "Designer"),
                    ("limited_edition", "Limited Edition"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "services",
        display_name: "Services",
        media_guidance: Some("Upload photos of your work, certifications, or team (optional)"),
        fields: &[
            FieldDefinition::select(
                "service_type",
                "Service Type",
                options![
                    ("cleaning", "Cleaning"),
                    ("repair", "Repair"),
                    ("tutoring", "Tutoring"),
                    ("photography", "Photography"),
                    ("catering", "Catering"),
                    ("consulting", "Consulting"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "availability",
                "Availability",
                options![
                    ("weekdays", "Weekdays"),
                    ("weekends", "Weekends"),
                    ("24/7", "24/7"),
                    ("by_appointment", "By Appointment"),
                ],
            )
            .required(),
            FieldDefinition::number("experience_years", "Years of Experience")
                .min(0.0)
                .placeholder("e.g., 5"),
            FieldDefinition::line_list("qualifications", "Qualifications (one per line)")
                .placeholder("Certified Professional\nLicensed\nInsured")
                .helper("Enter each qualification on a new line"),
            FieldDefinition::text("service_area", "Service Area")
                .placeholder("e.g., City-wide, Specific neighborhoods"),
            FieldDefinition::multi_select(
                "languages",
                "Languages Spoken",
                options![
                    ("english", "English"),
                    ("french", "French"),
                    ("arabic", "Arabic"),
                    ("spanish", "Spanish"),
                    ("swahili", "Swahili"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("emergency_service", "Emergency Service"),
                    ("same_day", "Same-day Service"),
                    ("free_consultation", "Free Consultation"),
                    ("guarantee", "Satisfaction Guarantee"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "home-furniture",
        display_name: "Home & Furniture",
        media_guidance: Some("Upload photos from multiple angles showing condition and dimensions"),
        fields: &[
            FieldDefinition::select(
                "furniture_type",
                "Furniture Type",
                options![
                    ("sofa", "Sofa"),
                    ("bed", "Bed"),
                    ("table", "Table"),
                    ("chair", "Chair"),
                    ("cabinet", "Cabinet"),
                    ("desk", "Desk"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::text("material", "Material").placeholder("e.g., Wood, Metal, Fabric"),
            FieldDefinition::text("color", "Color").placeholder("e.g., Brown"),
            FieldDefinition::text("dimensions", "Dimensions").placeholder("e.g., 200x100x80 cm"),
            FieldDefinition::select("assembly_required", "Assembly Required", YES_NO),
            FieldDefinition::select(
                "room",
                "Room",
                options![
                    ("living_room", "Living Room"),
                    ("bedroom", "Bedroom"),
                    ("dining", "Dining Room"),
                    ("office", "Office"),
                    ("outdoor", "Outdoor"),
                ],
            ),
            FieldDefinition::select(
                "style",
                "Style",
                options![
                    ("modern", "Modern"),
                    ("classic", "Classic"),
                    ("rustic", "Rustic"),
                    ("minimalist", "Minimalist"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("storage", "Storage"),
                    ("adjustable", "Adjustable"),
                    ("foldable", "Foldable"),
                    ("extendable", "Extendable"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "pets",
        display_name: "Pets & Birds",
        media_guidance: Some("Upload clear photos of the pet, vaccination records if available"),
        fields: &[
            FieldDefinition::select(
                "pet_type",
                "Pet Type",
                options![
                    ("dog", "Dog"),
                    ("cat", "Cat"),
                    ("bird", "Bird"),
                    ("fish", "Fish"),
                    ("rabbit", "Rabbit"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::text("breed", "Breed").placeholder("e.g., Golden Retriever"),
            FieldDefinition::text("age", "Age").placeholder("e.g., 2 years, 6 months"),
            FieldDefinition::select(
                "gender",
                "Gender",
                options![("male", "Male"), ("female", "Female")],
            ),
            FieldDefinition::text("color", "Color").placeholder("e.g., Golden"),
            FieldDefinition::select("vaccinated", "Vaccinated", YES_NO).required(),
            FieldDefinition::select("pedigree", "Pedigree", YES_NO),
            FieldDefinition::select("trained", "Trained", YES_NO),
            FieldDefinition::select(
                "health_status",
                "Health Status",
                options![("healthy", "Healthy"), ("special_needs", "Special Needs")],
            ),
            FieldDefinition::multi_select(
                "features",
                "Characteristics",
                options![
                    ("friendly", "Friendly"),
                    ("house_trained", "House Trained"),
                    ("good_with_kids", "Good with Kids"),
                    ("good_with_pets", "Good with Other Pets"),
                    ("playful", "Playful"),
                    ("calm", "Calm"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "kids-babies",
        display_name: "Kids & Babies",
        media_guidance: Some(
            "Upload clear photos showing condition, tags, and any safety certifications",
        ),
        fields: &[
            FieldDefinition::select(
                "item_type",
                "Item Type",
                options![
                    ("clothing", "Clothing"),
                    ("toys", "Toys"),
                    ("furniture", "Furniture"),
                    ("stroller", "Stroller"),
                    ("car_seat", "Car Seat"),
                    ("feeding", "Feeding"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "age_range",
                "Age Range",
                options![
                    ("0-6months", "0-6 months"),
                    ("6-12months", "6-12 months"),
                    ("1-2years", "1-2 years"),
                    ("3-5years", "3-5 years"),
                    ("6+years", "6+ years"),
                ],
            )
            .required(),
            FieldDefinition::select(
                "gender",
                "Gender",
                options![("boy", "Boy"), ("girl", "Girl"), ("unisex", "Unisex")],
            ),
            FieldDefinition::text("brand", "Brand").placeholder("e.g., Fisher Price"),
            FieldDefinition::text("size", "Size").placeholder("e.g., 0-3m, 6-12m"),
            FieldDefinition::text("color", "Color").placeholder("e.g., Pink"),
            FieldDefinition::text("material", "Material").placeholder("e.g., Cotton, Plastic"),
            FieldDefinition::select("safety_certified", "Safety Certified", YES_NO),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("washable", "Washable"),
                    ("adjustable", "Adjustable"),
                    ("portable", "Portable"),
                    ("educational", "Educational"),
                    ("organic", "Organic"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "hobbies",
        display_name: "Hobbies",
        media_guidance: Some(
            "Upload clear photos showing condition, any signatures, certificates, or special features",
        ),
        fields: &[
            FieldDefinition::select(
                "hobby_type",
                "Hobby Type",
                options![
                    ("collectibles", "Collectibles"),
                    ("sports", "Sports Equipment"),
                    ("music", "Musical Instruments"),
                    ("art", "Art"),
                    ("books", "Books"),
                    ("games", "Games"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::text("item_category", "Item Category")
                .placeholder("e.g., Antiques, Bicycles, Guitars"),
            FieldDefinition::text("brand", "Brand").placeholder("e.g., Fender"),
            FieldDefinition::number("year", "Year")
                .min(1800.0)
                .max(2026.0)
                .placeholder("e.g., 2015"),
            FieldDefinition::text("material", "Material").placeholder("e.g., Wood, Metal, Paper"),
            FieldDefinition::select(
                "rarity",
                "Rarity",
                options![
                    ("common", "Common"),
                    ("rare", "Rare"),
                    ("limited_edition", "Limited Edition"),
                    ("vintage", "Vintage"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("signed", "Signed"),
                    ("first_edition", "First Edition"),
                    ("mint_condition", "Mint Condition"),
                    ("authenticated", "Authenticated"),
                    ("complete_set", "Complete Set"),
                ],
            ),
        ],
    },
    CategorySchema {
        category_id: "businesses",
        display_name: "Businesses & Industrial",
        media_guidance: Some(
            "Upload photos of the business premises, equipment, or relevant documents",
        ),
        fields: &[
            FieldDefinition::select(
                "business_type",
                "Business Type",
                options![
                    ("restaurant", "Restaurant"),
                    ("retail", "Retail"),
                    ("manufacturing", "Manufacturing"),
                    ("agriculture", "Agriculture"),
                    ("construction", "Construction"),
                    ("other", "Other"),
                ],
            )
            .required(),
            FieldDefinition::text("industry", "Industry")
                .placeholder("e.g., Food & Beverage, Fashion"),
            FieldDefinition::number("established_year", "Year Established")
                .min(1900.0)
                .max(2026.0)
                .placeholder("e.g., 2015"),
            FieldDefinition::text("employees", "Number of Employees").placeholder("e.g., 10-50"),
            FieldDefinition::text("revenue", "Annual Revenue")
                .placeholder("e.g., $100,000 - $500,000"),
            FieldDefinition::select("equipment_included", "Equipment Included", YES_NO),
            FieldDefinition::text("lease_terms", "Lease Terms")
                .placeholder("e.g., Negotiable, 5 years remaining"),
            FieldDefinition::select(
                "reason_for_sale",
                "Reason for Sale",
                options![
                    ("retirement", "Retirement"),
                    ("relocation", "Relocation"),
                    ("expansion", "Expansion"),
                    ("other", "Other"),
                ],
            ),
            FieldDefinition::multi_select(
                "features",
                "Features",
                options![
                    ("profitable", "Profitable"),
                    ("established_clientele", "Established Clientele"),
                    ("prime_location", "Prime Location"),
                    ("growth_potential", "Growth Potential"),
                    ("online_presence", "Strong Online Presence"),
                ],
            ),
        ],
    },
];

/// Exact lookup by category slug
pub fn get(category_id: &str) -> Option<&'static CategorySchema> {
    CATEGORY_SCHEMAS
        .iter()
        .find(|schema| schema.category_id == category_id)
}

/// Resolve the schema for a category slug.
///
/// An exact slug wins. Otherwise the first schema, in declaration order,
/// whose slug is contained in the query is used, so sub-category slugs such
/// as `motors-cars` still get the `motors` form. `None` means the category
/// uses the generic form.
pub fn lookup(query: &str) -> Option<&'static CategorySchema> {
    if query.is_empty() {
        return None;
    }
    get(query).or_else(|| {
        CATEGORY_SCHEMAS
            .iter()
            .find(|schema| query.contains(schema.category_id))
    })
}

pub fn category_ids() -> impl Iterator<Item = &'static str> {
    CATEGORY_SCHEMAS.iter().map(|schema| schema.category_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;
    use std::collections::HashSet;

    #[test]
    fn field_names_are_unique_per_schema() {
        for schema in CATEGORY_SCHEMAS {
            let mut seen = HashSet::new();
            for field in schema.fields {
                assert!(
                    seen.insert(field.name),
                    "{} declares {} twice",
                    schema.category_id,
                    field.name
                );
            }
        }
    }

    #[test]
    fn choice_fields_declare_options() {
        for schema in CATEGORY_SCHEMAS {
            for field in schema.fields {
                if field.is_choice() {
                    assert!(
                        !field.constraints.options.is_empty(),
                        "{}.{} has no options",
                        schema.category_id,
                        field.name
                    );
                } else {
                    assert!(field.constraints.options.is_empty());
                }
            }
        }
    }

    #[test]
    fn numeric_ranges_are_ordered() {
        for schema in CATEGORY_SCHEMAS {
            for field in schema.fields {
                if let (Some(min), Some(max)) = (field.constraints.min, field.constraints.max) {
                    assert_eq!(field.kind, FieldKind::Number);
                    assert!(min <= max, "{}.{}", schema.category_id, field.name);
                }
            }
        }
    }

    #[test]
    fn every_schema_has_a_required_field() {
        for schema in CATEGORY_SCHEMAS {
            assert!(schema.required_fields().next().is_some(), "{}", schema.category_id);
        }
    }

    #[test]
    fn category_ids_are_unique() {
        let ids: HashSet<_> = category_ids().collect();
        assert_eq!(ids.len(), CATEGORY_SCHEMAS.len());
        assert_eq!(ids.len(), 11);
    }

    #[test]
    fn lookup_prefers_exact_match() {
        assert_eq!(lookup("motors").unwrap().display_name, "Motors");
        assert_eq!(lookup("home-furniture").unwrap().category_id, "home-furniture");
    }

    #[test]
    fn lookup_falls_back_to_first_contained_slug() {
        assert_eq!(lookup("motors-cars").unwrap().category_id, "motors");
        assert_eq!(lookup("used-electronics").unwrap().category_id, "electronics");
        // both "property" and "jobs" are contained; declaration order decides
        assert_eq!(lookup("jobs-in-property").unwrap().category_id, "property");
    }

    #[test]
    fn lookup_misses_are_none() {
        assert!(lookup("").is_none());
        assert!(lookup("community").is_none());
        assert!(lookup("Motors").is_none());
    }

    #[test]
    fn line_list_fields_are_long_text() {
        let jobs = get("jobs").unwrap();
        let requirements = jobs.field("requirements").unwrap();
        assert!(requirements.one_per_line);
        assert_eq!(requirements.kind, FieldKind::LongText);
        assert!(!jobs.field("experience").unwrap().one_per_line);
    }
}
