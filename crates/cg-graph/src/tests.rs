//! Unit tests for cg-graph.
//!
//! All tests use hand-crafted networks; every store-level test runs once per
//! resolver.

#[cfg(test)]
mod helpers {
    use cg_core::{City, GeoPoint, Route};

    use crate::{CityGraph, NameResolver};

    pub fn city(name: &str, lat: f64, lon: f64) -> City {
        City::new(name, format!("{name}, Catalonia"), "ES", GeoPoint::new(lat, lon))
    }

    /// Three cities, three routes:
    ///
    /// ```text
    ///   A ──(10 m, 5 s)──► B ──(10 m, 20 s)──► C
    ///   A ──────────(30 m, 3 s)──────────────► C
    /// ```
    ///
    /// Shortest A→C by distance goes through B (20 m); by duration it is the
    /// direct road (3 s).
    pub fn triangle<R: NameResolver>() -> CityGraph<R> {
        let mut g = CityGraph::new();
        g.add_city(city("A", 41.0, 2.0));
        g.add_city(city("B", 41.1, 2.1));
        g.add_city(city("C", 41.2, 2.2));
        g.add_route(Route::new("A", "B", 10, 5));
        g.add_route(Route::new("B", "C", 10, 20));
        g.add_route(Route::new("A", "C", 30, 3));
        g
    }

    /// A small Catalan road map (distances in metres, durations in seconds).
    pub fn catalonia() -> (Vec<City>, Vec<Route>) {
        let cities = vec![
            city("Barcelona", 41.3874, 2.1686),
            city("Girona", 41.9794, 2.8214),
            city("Figueres", 42.2666, 2.9616),
            city("Vic", 41.9301, 2.2549),
            city("Manresa", 41.7251, 1.8266),
            city("Lleida", 41.6176, 0.6200),
            city("Tarragona", 41.1189, 1.2445),
            city("Reus", 41.1498, 1.1055),
        ];
        let mut routes = Vec::new();
        let mut both = |a: &str, b: &str, d: u32, t: u32| {
            routes.push(Route::new(a, b, d, t));
            routes.push(Route::new(b, a, d, t));
        };
        both("Barcelona", "Girona", 100_000, 4_000);
        both("Girona", "Figueres", 40_000, 1_800);
        both("Barcelona", "Vic", 70_000, 3_600);
        both("Vic", "Girona", 80_000, 4_500);
        both("Barcelona", "Manresa", 65_000, 3_300);
        both("Manresa", "Lleida", 110_000, 4_800);
        both("Barcelona", "Tarragona", 100_000, 3_900);
        both("Tarragona", "Reus", 14_000, 900);
        both("Reus", "Lleida", 95_000, 3_800);
        both("Tarragona", "Lleida", 90_000, 3_400);
        (cities, routes)
    }
}

// ── Store behaviour ───────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use cg_core::{GeoPoint, GrowthPolicy, NetworkConfig, Route, SlotId};

    use super::helpers::{city, triangle};
    use crate::{CityGraph, GraphError, HashedResolver, LinearResolver, NameResolver, TreeResolver};

    fn slots_are_sequential<R: NameResolver>() {
        let mut g: CityGraph<R> = CityGraph::new();
        assert_eq!(g.add_city(city("A", 0.0, 0.0)), Some(SlotId(0)));
        assert_eq!(g.add_city(city("B", 0.0, 1.0)), Some(SlotId(1)));
        // Same name, different coordinates: still a duplicate.
        assert_eq!(g.add_city(city("A", 5.0, 5.0)), None);
        assert_eq!(g.city_count(), 2);
        assert_eq!(g.city("A").unwrap().position(), GeoPoint::new(0.0, 0.0));
        assert_eq!(g.slot_of("B").unwrap(), SlotId(1));
    }

    #[test]
    fn sequential_slots_all_resolvers() {
        slots_are_sequential::<LinearResolver>();
        slots_are_sequential::<TreeResolver>();
        slots_are_sequential::<HashedResolver>();
    }

    fn unresolved_route_is_dropped<R: NameResolver>() {
        let mut g: CityGraph<R> = triangle();
        let before: Vec<String> = g.children("A").unwrap().iter().map(|c| c.name().to_owned()).collect();

        assert!(!g.add_route(Route::new("A", "Nowhere", 1, 1)));
        assert!(!g.add_route(Route::new("Nowhere", "A", 1, 1)));

        assert_eq!(g.route_count(), 3);
        assert_eq!(g.dropped_routes(), 2);
        assert_eq!(g.out_degree("A").unwrap(), 2);
        let after: Vec<String> = g.children("A").unwrap().iter().map(|c| c.name().to_owned()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unresolved_route_all_resolvers() {
        unresolved_route_is_dropped::<LinearResolver>();
        unresolved_route_is_dropped::<TreeResolver>();
        unresolved_route_is_dropped::<HashedResolver>();
    }

    fn adjacency_queries<R: NameResolver>() {
        let g: CityGraph<R> = triangle();

        let children: Vec<&str> = g.children("A").unwrap().iter().map(|c| c.name()).collect();
        assert_eq!(children, ["B", "C"]); // insertion order
        assert!(g.children("C").unwrap().is_empty());
        assert_eq!(
            g.children("Z").unwrap_err(),
            GraphError::CityNotFound("Z".into())
        );

        let label = g.label("B", "C").unwrap().unwrap();
        assert_eq!((label.distance_m, label.duration_s), (10, 20));
        assert!(g.label("C", "A").unwrap().is_none());
        assert!(g.label("A", "Z").unwrap().is_none());
        assert!(g.label("Z", "A").is_err());
    }

    #[test]
    fn adjacency_all_resolvers() {
        adjacency_queries::<LinearResolver>();
        adjacency_queries::<TreeResolver>();
        adjacency_queries::<HashedResolver>();
    }

    #[test]
    fn out_degree_matches_list_length() {
        let (cities, routes) = super::helpers::catalonia();
        let mut g: CityGraph<HashedResolver> =
            CityGraph::from_cities(cities, &NetworkConfig::default()).unwrap();
        for r in routes {
            assert!(g.add_route(r));
        }
        let mut total = 0;
        for (i, c) in g.cities().enumerate() {
            let walked = g.out_edges(SlotId(i as u32)).count();
            assert_eq!(walked, g.out_degree(c.name()).unwrap(), "{}", c.name());
            assert_eq!(walked, g.routes_from(c.name()).unwrap().count());
            total += walked;
        }
        assert_eq!(total, g.route_count());
    }

    #[test]
    fn edges_record_resolved_endpoints() {
        let g: CityGraph<TreeResolver> = triangle();
        let first = g.out_edges(SlotId(0)).next().unwrap();
        let record = g.edge(first);
        assert_eq!(record.from, SlotId(0));
        assert_eq!(record.to, SlotId(1));
        assert_eq!(record.route.to, "B");
        assert_eq!(g.out_edges(SlotId(99)).count(), 0);
    }

    #[test]
    fn set_position_keeps_name_resolvable() {
        let mut g: CityGraph<TreeResolver> = triangle();
        g.set_position("B", GeoPoint::new(1.0, 1.0)).unwrap();
        assert_eq!(g.city("B").unwrap().position(), GeoPoint::new(1.0, 1.0));
        assert_eq!(g.children("A").unwrap()[0].position(), GeoPoint::new(1.0, 1.0));
        assert!(g.set_position("Z", GeoPoint::default()).is_err());
    }

    #[test]
    fn vertex_table_grows_past_threshold() {
        let config = NetworkConfig {
            vertices: GrowthPolicy { initial_spare: 4, increment: 5, ..GrowthPolicy::default() },
            ..NetworkConfig::default()
        };
        let mut g: CityGraph<LinearResolver> = CityGraph::with_config(0, &config).unwrap();
        assert_eq!(g.capacity(), 4);
        g.add_city(city("A", 0.0, 0.0));
        g.add_city(city("B", 0.0, 0.0));
        assert_eq!(g.capacity(), 4); // 2 / 4 = 0.5
        g.add_city(city("C", 0.0, 0.0));
        assert_eq!(g.capacity(), 9); // 3 / 4 = 0.75
    }

    #[test]
    fn truncating_vertex_table_grows_when_full() {
        let config = NetworkConfig {
            vertices: GrowthPolicy { initial_spare: 4, increment: 5, ..GrowthPolicy::truncating() },
            ..NetworkConfig::default()
        };
        let mut g: CityGraph<LinearResolver> = CityGraph::with_config(0, &config).unwrap();
        for name in ["A", "B", "C"] {
            g.add_city(city(name, 0.0, 0.0));
        }
        assert_eq!(g.capacity(), 4);
        g.add_city(city("D", 0.0, 0.0));
        assert_eq!(g.capacity(), 9);
    }

    fn growth_preserves_lookups<R: NameResolver>() {
        let config = NetworkConfig {
            vertices: GrowthPolicy { initial_spare: 8, increment: 16, ..GrowthPolicy::default() },
            index: GrowthPolicy { initial_spare: 8, increment: 16, ..GrowthPolicy::default() },
            ..NetworkConfig::default()
        };
        let mut g: CityGraph<R> = CityGraph::with_config(0, &config).unwrap();
        for i in 0..600u32 {
            assert_eq!(g.add_city(city(&format!("c{i}"), 0.0, 0.0)), Some(SlotId(i)));
        }
        for i in 1..600u32 {
            assert!(g.add_route(Route::new(format!("c{}", i - 1), format!("c{i}"), 1, 1)));
        }
        assert!(g.capacity() >= 600);
        for i in 0..600u32 {
            assert_eq!(g.slot_of(&format!("c{i}")).unwrap(), SlotId(i));
        }
        assert_eq!(g.route_count(), 599);
    }

    #[test]
    fn growth_preserves_lookups_all_resolvers() {
        growth_preserves_lookups::<LinearResolver>();
        growth_preserves_lookups::<TreeResolver>();
        growth_preserves_lookups::<HashedResolver>();
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = NetworkConfig {
            index: GrowthPolicy { increment: 0, ..GrowthPolicy::default() },
            ..NetworkConfig::default()
        };
        let result = CityGraph::<HashedResolver>::with_config(10, &config);
        assert!(matches!(result, Err(GraphError::Config(_))));
    }
}

// ── Resolvers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod resolvers {
    use cg_core::{NetworkConfig, SlotId};

    use crate::{
        CityGraph, HashedResolver, LinearResolver, NameResolver, ResolverKind, TreeResolver,
    };

    #[test]
    fn kinds() {
        assert_eq!(CityGraph::<LinearResolver>::new().resolver_kind(), ResolverKind::Linear);
        assert_eq!(CityGraph::<TreeResolver>::new().resolver_kind(), ResolverKind::Tree);
        assert_eq!(CityGraph::<HashedResolver>::new().resolver_kind(), ResolverKind::Hashed);
    }

    #[test]
    fn unseeded_tree_misses() {
        let r = TreeResolver::with_config(0, &NetworkConfig::default());
        assert!(r.tree().is_none());
        assert_eq!(r.resolve("Vic", &[]), None);
    }

    #[test]
    fn tree_is_seeded_by_first_city() {
        let mut r = TreeResolver::default();
        r.register("Vic", SlotId(0));
        r.register("Olot", SlotId(1));
        assert_eq!(r.tree().unwrap().len(), 2);
        assert_eq!(r.resolve("Olot", &[]), Some(SlotId(1)));
    }

    #[test]
    fn hashed_index_sized_from_config() {
        let r = HashedResolver::with_config(10, &NetworkConfig::default());
        assert_eq!(r.index().capacity(), 341);
    }

    #[test]
    fn all_resolvers_agree_on_catalonia() {
        let (cities, routes) = super::helpers::catalonia();
        let net = crate::CityNetworks::from_records(cities.clone(), routes, NetworkConfig::default())
            .unwrap();
        for c in &cities {
            assert!(net.consistent_slot(c.name()).unwrap(), "{}", c.name());
            for kind in ResolverKind::ALL {
                assert_eq!(net.city(kind, c.name()).unwrap(), c);
            }
        }
    }
}

// ── Shortest paths ────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use cg_core::{Metric, Route};

    use super::helpers::{city, triangle};
    use crate::{
        CityGraph, DijkstraRouter, GraphError, HashedResolver, LinearResolver, NameResolver,
        Router, TreeResolver,
    };

    fn metric_selects_path<R: NameResolver>() {
        let g: CityGraph<R> = triangle();

        let by_distance = g.shortest_path("A", "C", Metric::ByDistance).unwrap();
        assert_eq!(by_distance.names(), ["A", "B", "C"]);
        assert_eq!(by_distance.distance_m, 20);
        assert_eq!(by_distance.duration_s, 25); // both totals are reported
        assert_eq!(by_distance.cost(), 20);

        let by_duration = g.shortest_path("A", "C", Metric::ByDuration).unwrap();
        assert_eq!(by_duration.names(), ["A", "C"]);
        assert_eq!(by_duration.duration_s, 3);
        assert_eq!(by_duration.distance_m, 30);
        assert_eq!(by_duration.hops(), 1);
    }

    #[test]
    fn metric_selects_path_all_resolvers() {
        metric_selects_path::<LinearResolver>();
        metric_selects_path::<TreeResolver>();
        metric_selects_path::<HashedResolver>();
    }

    fn missing_names_fail<R: NameResolver>() {
        let g: CityGraph<R> = triangle();
        assert_eq!(
            DijkstraRouter.route(&g, "X", "C", Metric::ByDistance).unwrap_err(),
            GraphError::CityNotFound("X".into())
        );
        assert_eq!(
            DijkstraRouter.route(&g, "A", "Y", Metric::ByDuration).unwrap_err(),
            GraphError::CityNotFound("Y".into())
        );
    }

    #[test]
    fn missing_names_all_resolvers() {
        missing_names_fail::<LinearResolver>();
        missing_names_fail::<TreeResolver>();
        missing_names_fail::<HashedResolver>();
    }

    #[test]
    fn unreachable_destination() {
        let g: CityGraph<HashedResolver> = triangle();
        let err = g.shortest_path("C", "A", Metric::ByDistance).unwrap_err();
        assert_eq!(err, GraphError::Unreachable { from: "C".into(), to: "A".into() });
    }

    #[test]
    fn isolated_city_is_unreachable() {
        let mut g: CityGraph<TreeResolver> = triangle();
        g.add_city(city("D", 0.0, 0.0));
        assert!(matches!(
            g.shortest_path("A", "D", Metric::ByDuration),
            Err(GraphError::Unreachable { .. })
        ));
    }

    #[test]
    fn same_city_is_trivial() {
        let g: CityGraph<LinearResolver> = triangle();
        let p = g.shortest_path("B", "B", Metric::ByDistance).unwrap();
        assert!(p.is_trivial());
        assert_eq!((p.distance_m, p.duration_s), (0, 0));
        assert_eq!(p.names(), ["B"]);
    }

    #[test]
    fn cheapest_parallel_route_wins() {
        let mut g: CityGraph<LinearResolver> = CityGraph::new();
        g.add_city(city("A", 0.0, 0.0));
        g.add_city(city("B", 0.0, 1.0));
        g.add_route(Route::new("A", "B", 100, 1));
        g.add_route(Route::new("A", "B", 50, 9));
        let by_distance = g.shortest_path("A", "B", Metric::ByDistance).unwrap();
        assert_eq!((by_distance.distance_m, by_distance.duration_s), (50, 9));
        let by_duration = g.shortest_path("A", "B", Metric::ByDuration).unwrap();
        assert_eq!((by_duration.distance_m, by_duration.duration_s), (100, 1));
        // `label` still reports the first stored route.
        assert_eq!(g.label("A", "B").unwrap().unwrap().distance_m, 100);
    }

    #[test]
    fn catalonia_paths() {
        let (cities, routes) = super::helpers::catalonia();
        let mut g: CityGraph<TreeResolver> =
            CityGraph::from_cities(cities, &Default::default()).unwrap();
        for r in routes {
            g.add_route(r);
        }

        // Via Manresa 175 km vs via Tarragona 190 km.
        let p = g.shortest_path("Barcelona", "Lleida", Metric::ByDistance).unwrap();
        assert_eq!(p.names(), ["Barcelona", "Manresa", "Lleida"]);
        assert_eq!(p.distance_m, 175_000);

        // Via Tarragona 7 300 s vs via Manresa 8 100 s.
        let p = g.shortest_path("Barcelona", "Lleida", Metric::ByDuration).unwrap();
        assert_eq!(p.names(), ["Barcelona", "Tarragona", "Lleida"]);
        assert_eq!(p.duration_s, 7_300);

        let p = g.shortest_path("Figueres", "Reus", Metric::ByDistance).unwrap();
        assert_eq!(p.names(), ["Figueres", "Girona", "Barcelona", "Tarragona", "Reus"]);
        assert_eq!(p.distance_m, 254_000);
        assert_eq!(p.origin.name(), "Figueres");
        assert_eq!(p.destination.name(), "Reus");
        assert_eq!(p.cities.last().unwrap().name(), "Reus");
    }

    #[test]
    fn display_renders_km_and_clock() {
        let (cities, routes) = super::helpers::catalonia();
        let mut g: CityGraph<HashedResolver> =
            CityGraph::from_cities(cities, &Default::default()).unwrap();
        for r in routes {
            g.add_route(r);
        }
        let p = g.shortest_path("Girona", "Barcelona", Metric::ByDuration).unwrap();
        assert_eq!(
            p.to_string(),
            "Origin: Girona\n\
             Destination: Barcelona\n\
             Distance: 100.0 km\n\
             Total duration: 01:06:40\n\
             Path: Girona -> Barcelona"
        );
    }

    /// Floyd–Warshall reference costs for cross-checking.
    fn all_pairs(n: usize, edges: &[(usize, usize, u64)]) -> Vec<Vec<u64>> {
        let mut d = vec![vec![u64::MAX; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0;
        }
        for &(a, b, w) in edges {
            d[a][b] = d[a][b].min(w);
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if d[i][k] != u64::MAX && d[k][j] != u64::MAX {
                        d[i][j] = d[i][j].min(d[i][k] + d[k][j]);
                    }
                }
            }
        }
        d
    }

    #[test]
    fn random_graph_matches_reference() {
        use rand::rngs::SmallRng;
        use rand::{Rng, SeedableRng};

        let mut rng = SmallRng::seed_from_u64(2024);
        let n = 40;
        let mut g: CityGraph<HashedResolver> = CityGraph::new();
        for i in 0..n {
            g.add_city(city(&format!("N{i}"), 0.0, 0.0));
        }
        let mut dist_edges = Vec::new();
        let mut dur_edges = Vec::new();
        for _ in 0..160 {
            let a = rng.gen_range(0..n);
            let b = rng.gen_range(0..n);
            let d = rng.gen_range(0..1_000u32);
            let t = rng.gen_range(0..1_000u32);
            g.add_route(Route::new(format!("N{a}"), format!("N{b}"), d, t));
            dist_edges.push((a, b, u64::from(d)));
            dur_edges.push((a, b, u64::from(t)));
        }

        for (metric, edges) in [(Metric::ByDistance, dist_edges), (Metric::ByDuration, dur_edges)] {
            let reference = all_pairs(n, &edges);
            for a in 0..n {
                for b in 0..n {
                    let result = g.shortest_path(&format!("N{a}"), &format!("N{b}"), metric);
                    match reference[a][b] {
                        u64::MAX => assert!(
                            matches!(result, Err(GraphError::Unreachable { .. })),
                            "N{a} -> N{b} should be unreachable"
                        ),
                        expected => {
                            let path = result.unwrap();
                            assert_eq!(path.cost(), expected, "N{a} -> N{b} {metric:?}");
                            assert_eq!(path.destination.name(), format!("N{b}"));
                        }
                    }
                }
            }
        }
    }
}

// ── CityNetworks ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod networks {
    use cg_core::{GeoPoint, Metric, NetworkConfig, Route};

    use super::helpers::{catalonia, city};
    use crate::{CityNetworks, GraphError, ResolverKind};

    fn loaded() -> CityNetworks {
        let (cities, routes) = catalonia();
        CityNetworks::from_records(cities, routes, NetworkConfig::default()).unwrap()
    }

    #[test]
    fn import_counts_and_drops() {
        let (cities, mut routes) = catalonia();
        routes.push(Route::new("Barcelona", "Andorra", 200_000, 9_000));
        let net = CityNetworks::from_records(cities, routes, NetworkConfig::default()).unwrap();
        assert_eq!(net.city_count(), 8);
        assert_eq!(net.route_count(), 20);
        assert_eq!(net.linear().dropped_routes(), 1);
        assert_eq!(net.tree().dropped_routes(), 1);
        assert_eq!(net.hashed().dropped_routes(), 1);
    }

    #[test]
    fn stores_agree_on_every_query() {
        let net = loaded();
        for metric in [Metric::ByDistance, Metric::ByDuration] {
            let cmp = net.shortest_path_all("Figueres", "Lleida", metric);
            assert!(cmp.agree(), "{cmp:?}");
            assert!(cmp.get(ResolverKind::Hashed).is_ok());
        }
        let cmp = net.shortest_path_all("Figueres", "Andorra", Metric::ByDistance);
        assert!(cmp.agree());
        assert!(matches!(cmp.linear, Err(GraphError::CityNotFound(_))));
    }

    #[test]
    fn per_kind_queries() {
        let net = loaded();
        for kind in ResolverKind::ALL {
            assert!(net.contains(kind, "Vic"));
            let children: Vec<&str> = net.children(kind, "Vic").unwrap().iter().map(|c| c.name()).collect();
            assert_eq!(children, ["Barcelona", "Girona"]);
            assert_eq!(net.label(kind, "Vic", "Girona").unwrap().unwrap().distance_m, 80_000);
            assert_eq!(
                net.shortest_path(kind, "Reus", "Vic", Metric::ByDistance).unwrap().distance_m,
                184_000
            );
        }
    }

    #[test]
    fn discovery_respects_cutoff() {
        let mut net = loaded();
        let stored = net.add_discovered(
            city("Sitges", 41.2372, 1.8059),
            vec![
                Route::new("Sitges", "Barcelona", 40_000, 2_400),
                Route::new("Barcelona", "Sitges", 40_000, 2_400),
                Route::new("Sitges", "Figueres", 300_000, 12_000), // at the cutoff
                Route::new("Sitges", "Atlantis", 1_000, 60),        // unknown city
            ],
        );
        assert_eq!(stored, 2);
        assert_eq!(net.route_count(), 22);
        for kind in ResolverKind::ALL {
            assert!(net.contains(kind, "Sitges"));
            assert!(net.label(kind, "Sitges", "Figueres").unwrap().is_none());
        }
        assert!(net.consistent_slot("Sitges").unwrap());
        let p = net.shortest_path(ResolverKind::Tree, "Sitges", "Girona", Metric::ByDistance).unwrap();
        assert_eq!(p.distance_m, 140_000);
    }

    #[test]
    fn candidates_nearest_first() {
        let net = loaded();
        let near: Vec<&str> = net
            .candidates_near(GeoPoint::new(41.13, 1.17), 30_000.0)
            .into_iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(near, ["Reus", "Tarragona"]);
    }

    #[test]
    fn duplicate_city_rejected_everywhere() {
        let mut net = loaded();
        assert!(!net.add_city(city("Vic", 0.0, 0.0)));
        assert_eq!(net.city_count(), 8);
        assert_eq!(net.tree().city_count(), 8);
        assert_eq!(net.hashed().city_count(), 8);
    }

    #[test]
    fn moving_a_city_updates_all_stores() {
        let mut net = loaded();
        net.set_position("Reus", GeoPoint::new(41.15, 1.11)).unwrap();
        for kind in ResolverKind::ALL {
            assert_eq!(net.city(kind, "Reus").unwrap().position(), GeoPoint::new(41.15, 1.11));
        }
    }
}
