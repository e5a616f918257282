use crate::metadata::PageMetadataConfig;
use crate::registry::RouteRegistry;

struct RouteEntry {
    route: &'static str,
    title: &'static str,
    description: &'static str,
    keywords: &'static [&'static str],
    no_index: bool,
}

const HAUS_ROUTES: &[RouteEntry] = &[
    RouteEntry {
        route: "/",
        title: "Find Your Perfect Home",
        description: "Search homes for sale and rent, connect with trusted local agents, and manage your move in one place with HAUS.",
        keywords: &["homes for sale", "homes for rent", "property search"],
        no_index: false,
    },
    RouteEntry {
        route: "/about",
        title: "About Us",
        description: "Learn how HAUS is reinventing real estate with transparent pricing, smart search tools and a network of trusted local agents.",
        keywords: &["about", "company", "mission"],
        no_index: false,
    },
    RouteEntry {
        route: "/agents",
        title: "Find an Agent",
        description: "Browse top-rated real estate agents near you, compare reviews and recent sales, and book a consultation in minutes.",
        keywords: &["real estate agents", "realtors", "agent reviews"],
        no_index: false,
    },
    RouteEntry {
        route: "/search",
        title: "Search Properties",
        description: "Search thousands of homes, condos and apartments with filters for price, location, bedrooms and more.",
        keywords: &["property search", "homes", "condos", "apartments"],
        no_index: false,
    },
    RouteEntry {
        route: "/properties",
        title: "Property Listings",
        description: "Explore the latest property listings with photos, floor plans, neighborhood insights and price history.",
        keywords: &["listings", "property listings", "floor plans"],
        no_index: false,
    },
    RouteEntry {
        route: "/buy",
        title: "Buy a Home",
        description: "Everything you need to buy a home: curated listings, mortgage estimates, expert agents and guidance at every step.",
        keywords: &["buy a home", "home buying", "first-time buyers"],
        no_index: false,
    },
    RouteEntry {
        route: "/sell",
        title: "Sell Your Home",
        description: "Get an instant home valuation, list your property with expert agents and reach thousands of qualified buyers.",
        keywords: &["sell a home", "home valuation", "list property"],
        no_index: false,
    },
    RouteEntry {
        route: "/rent",
        title: "Rent a Home",
        description: "Find apartments and houses for rent with verified listings, virtual tours and simple online applications.",
        keywords: &["rentals", "apartments for rent", "houses for rent"],
        no_index: false,
    },
    RouteEntry {
        route: "/pricing",
        title: "Pricing",
        description: "Compare HAUS plans for buyers, sellers and agents, with transparent pricing and no hidden fees.",
        keywords: &["pricing", "plans", "subscription"],
        no_index: false,
    },
    RouteEntry {
        route: "/contact",
        title: "Contact Us",
        description: "Get in touch with the HAUS team for help with listings, accounts, partnerships or general questions.",
        keywords: &["contact", "support"],
        no_index: false,
    },
    RouteEntry {
        route: "/dashboard",
        title: "Dashboard",
        description: "Manage your saved searches, listings, appointments and account activity from your personal HAUS dashboard.",
        keywords: &["dashboard", "account"],
        no_index: false,
    },
    RouteEntry {
        route: "/favorites",
        title: "Favorites",
        description: "Review the homes you have saved, compare them side by side and get alerts when prices change.",
        keywords: &["saved homes", "favorites", "price alerts"],
        no_index: false,
    },
    RouteEntry {
        route: "/messages",
        title: "Messages",
        description: "Read and reply to conversations with agents, buyers and sellers in your secure HAUS inbox.",
        keywords: &["messages", "inbox"],
        no_index: false,
    },
    RouteEntry {
        route: "/finance",
        title: "Finance",
        description: "Estimate mortgage payments, check affordability and explore financing options for your next home.",
        keywords: &["mortgage calculator", "home financing", "affordability"],
        no_index: false,
    },
    RouteEntry {
        route: "/settings",
        title: "Account Settings",
        description: "Update your profile, notification preferences, privacy options and connected accounts on HAUS.",
        keywords: &["settings", "profile"],
        no_index: false,
    },
    RouteEntry {
        route: "/login",
        title: "Sign In",
        description: "Sign in to your HAUS account to access saved homes, messages and your personal dashboard.",
        keywords: &["sign in", "login"],
        no_index: true,
    },
    RouteEntry {
        route: "/signup",
        title: "Create an Account",
        description: "Create a free HAUS account to save homes, message agents and get personalized property alerts.",
        keywords: &["sign up", "create account"],
        no_index: true,
    },
    RouteEntry {
        route: "/privacy",
        title: "Privacy Policy",
        description: "Read how HAUS collects, uses and protects your personal information when you use our services.",
        keywords: &["privacy policy", "data protection"],
        no_index: false,
    },
    RouteEntry {
        route: "/terms",
        title: "Terms of Service",
        description: "Review the terms and conditions that govern your use of the HAUS website, apps and services.",
        keywords: &["terms of service", "terms and conditions"],
        no_index: false,
    },
];

/// The built-in HAUS route table
pub fn haus_routes() -> RouteRegistry {
    let mut registry = RouteRegistry::new();

    for entry in HAUS_ROUTES {
        let config = PageMetadataConfig::new(entry.title, entry.description)
            .with_keywords(entry.keywords.iter().copied())
            .with_no_index(entry.no_index);
        registry
            .register(entry.route, config)
            .expect("Built-in routes should be unique bare paths");
    }

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::policy::IndexPolicy;
    use crate::resolver::MetadataResolver;

    #[test]
    fn test_every_entry_registered() {
        let registry = haus_routes();
        assert_eq!(registry.len(), HAUS_ROUTES.len());
        for route in ["/", "/about", "/agents", "/search", "/dashboard", "/favorites", "/messages", "/finance"] {
            assert!(registry.get(route).is_some(), "missing {}", route);
        }
    }

    #[test]
    fn test_private_routes_resolve_noindex() {
        let site = SiteConfig::default();
        let policy = IndexPolicy::new(&site.no_index_patterns).unwrap();
        let resolver = MetadataResolver::new(site);
        let registry = haus_routes();

        for route in ["/dashboard", "/messages", "/favorites", "/finance", "/settings", "/login"] {
            let resolved = registry.resolve(route, &resolver, &policy).unwrap();
            assert!(!resolved.robots.is_indexable(), "{} should be noindex", route);
        }
        for route in ["/", "/about", "/agents", "/search"] {
            let resolved = registry.resolve(route, &resolver, &policy).unwrap();
            assert!(resolved.robots.is_indexable(), "{} should be indexable", route);
        }
    }
}
